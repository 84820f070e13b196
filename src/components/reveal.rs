use web_sys::Element;
use yew::prelude::*;
use yew_hooks::use_window_scroll;

/// Fraction of the viewport an element travels through while fading in.
const REVEAL_SPAN: f64 = 0.25;
const SLIDE_PX: f64 = 40.0;

/// 0.0 while the element's top is below the fold, 1.0 once it has risen
/// `REVEAL_SPAN` of the viewport above it.
pub fn reveal_progress(element_top: f64, viewport_height: f64) -> f64 {
    if viewport_height <= 0.0 {
        return 1.0;
    }
    let travelled = (viewport_height - element_top) / (viewport_height * REVEAL_SPAN);
    travelled.clamp(0.0, 1.0)
}

/// Progress only ever moves forward; scrolling back up does not hide content.
pub fn latch(previous: f64, current: f64) -> f64 {
    previous.max(current)
}

fn reveal_style(progress: f64) -> String {
    format!(
        "opacity: {:.3}; transform: translateY({:.1}px); transition: opacity 0.2s linear, transform 0.2s linear;",
        progress,
        (1.0 - progress) * SLIDE_PX
    )
}

#[derive(Properties, PartialEq)]
pub struct RevealProps {
    pub children: Children,
    #[prop_or_default]
    pub class: Classes,
}

#[function_component(Reveal)]
pub fn reveal(props: &RevealProps) -> Html {
    let node = use_node_ref();
    let progress = use_state(|| 0.0_f64);
    let (_, scroll_y) = use_window_scroll();

    {
        let node = node.clone();
        let progress = progress.clone();
        // quantised so the dependency compares cleanly
        let scroll_key = scroll_y.round() as i64;
        use_effect_with_deps(
            move |_| {
                if *progress < 1.0 {
                    let viewport_height = web_sys::window()
                        .and_then(|w| w.inner_height().ok())
                        .and_then(|h| h.as_f64())
                        .unwrap_or(0.0);
                    if let Some(element) = node.cast::<Element>() {
                        let top = element.get_bounding_client_rect().top();
                        let next = latch(*progress, reveal_progress(top, viewport_height));
                        if next != *progress {
                            progress.set(next);
                        }
                    }
                }
                || ()
            },
            scroll_key,
        );
    }

    html! {
        <div ref={node} class={classes!("reveal", props.class.clone())} style={reveal_style(*progress)}>
            { props.children.clone() }
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_over_the_fold() {
        assert_eq!(reveal_progress(1200.0, 800.0), 0.0);
        assert_eq!(reveal_progress(800.0, 800.0), 0.0);
        assert!((reveal_progress(700.0, 800.0) - 0.5).abs() < 1e-9);
        assert_eq!(reveal_progress(600.0, 800.0), 1.0);
        assert_eq!(reveal_progress(-300.0, 800.0), 1.0);
    }

    #[test]
    fn zero_height_viewport_shows_everything() {
        assert_eq!(reveal_progress(500.0, 0.0), 1.0);
    }

    #[test]
    fn latch_never_goes_backwards() {
        let mut shown = 0.0;
        for p in [0.2, 0.6, 0.1, 1.0, 0.0] {
            shown = latch(shown, p);
        }
        assert_eq!(shown, 1.0);
    }

    #[test]
    fn style_at_rest() {
        assert!(reveal_style(1.0).contains("translateY(0.0px)"));
        assert!(reveal_style(0.0).contains("opacity: 0.000"));
    }
}
