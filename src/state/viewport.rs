/// Widths below this are phones.
pub const TABLET_MIN_WIDTH: f64 = 600.0;
/// Widths at or above this get the desktop header.
pub const DESKTOP_MIN_WIDTH: f64 = 900.0;
/// The floating call/WhatsApp button shows once the page is scrolled past this.
pub const FLOATING_CONTACT_SCROLL_Y: f64 = 200.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ViewportClass {
    Mobile,
    Tablet,
    #[default]
    Desktop,
}

impl ViewportClass {
    pub fn from_width(width: f64) -> Self {
        if width < TABLET_MIN_WIDTH {
            ViewportClass::Mobile
        } else if width < DESKTOP_MIN_WIDTH {
            ViewportClass::Tablet
        } else {
            ViewportClass::Desktop
        }
    }

    pub fn is_desktop(self) -> bool {
        self == ViewportClass::Desktop
    }

    pub fn nav_variant(self) -> NavVariant {
        match self {
            ViewportClass::Desktop => NavVariant::Header,
            ViewportClass::Mobile | ViewportClass::Tablet => NavVariant::BottomBar,
        }
    }
}

/// The persistent navigation presentation. Exactly one is mounted at a time;
/// the drawer is an overlay and is not part of this choice.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavVariant {
    Header,
    BottomBar,
}

pub fn floating_contact_visible(scroll_y: f64) -> bool {
    scroll_y > FLOATING_CONTACT_SCROLL_Y
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_breakpoints() {
        assert_eq!(ViewportClass::from_width(0.0), ViewportClass::Mobile);
        assert_eq!(ViewportClass::from_width(599.9), ViewportClass::Mobile);
        assert_eq!(ViewportClass::from_width(600.0), ViewportClass::Tablet);
        assert_eq!(ViewportClass::from_width(899.0), ViewportClass::Tablet);
        assert_eq!(ViewportClass::from_width(900.0), ViewportClass::Desktop);
        assert_eq!(ViewportClass::from_width(1920.0), ViewportClass::Desktop);
    }

    #[test]
    fn exactly_one_persistent_nav_per_width() {
        let mut width = 320.0;
        while width < 1600.0 {
            let class = ViewportClass::from_width(width);
            let variant = class.nav_variant();
            let header = variant == NavVariant::Header;
            let bottom = variant == NavVariant::BottomBar;
            assert!(header ^ bottom, "width {width}");
            assert_eq!(header, class.is_desktop());
            width += 7.5;
        }
    }

    #[test]
    fn resize_across_breakpoint_swaps_variant() {
        let before = ViewportClass::from_width(1024.0).nav_variant();
        let after = ViewportClass::from_width(768.0).nav_variant();
        assert_eq!(before, NavVariant::Header);
        assert_eq!(after, NavVariant::BottomBar);
    }

    #[test]
    fn floating_contact_threshold() {
        assert!(!floating_contact_visible(0.0));
        assert!(!floating_contact_visible(200.0));
        assert!(floating_contact_visible(201.0));
        // scrolling back up hides it again
        assert!(!floating_contact_visible(150.0));
    }
}
