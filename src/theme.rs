use stylist::GlobalStyle;

/// Colour and type tokens shared by every component's inline styles.
const THEME: &str = r#"
:root {
    --gold: #c9a961;
    --navy: #0e1a33;
    --font-display: "Cormorant Garamond", Georgia, serif;
}

html {
    scroll-behavior: smooth;
}

body {
    margin: 0;
    font-family: "Inter", -apple-system, BlinkMacSystemFont, "Segoe UI", sans-serif;
    background: #0e1a33;
}

section[id] {
    scroll-margin-top: 72px;
}
"#;

pub fn install() {
    match GlobalStyle::new(THEME) {
        Ok(_) => log::debug!("theme installed"),
        Err(e) => log::error!("failed to install theme: {}", e),
    }
}
