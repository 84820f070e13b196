use std::rc::Rc;

use yew::prelude::*;

use crate::state::triggers::{GlooTimers, ScopedTimer};

const TOAST_VISIBLE_MS: u32 = 4_000;
const MAX_TOASTS: usize = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

impl ToastKind {
    fn class(self) -> &'static str {
        match self {
            ToastKind::Success => "toast success",
            ToastKind::Error => "toast error",
            ToastKind::Info => "toast info",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    pub id: u32,
    pub kind: ToastKind,
    pub message: String,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ToastQueue {
    next_id: u32,
    toasts: Vec<Toast>,
}

pub enum ToastAction {
    Push(ToastKind, String),
    Dismiss(u32),
}

impl ToastQueue {
    pub fn toasts(&self) -> &[Toast] {
        &self.toasts
    }
}

impl Reducible for ToastQueue {
    type Action = ToastAction;

    fn reduce(self: Rc<Self>, action: ToastAction) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            ToastAction::Push(kind, message) => {
                next.next_id = next.next_id.wrapping_add(1);
                next.toasts.push(Toast { id: next.next_id, kind, message });
                if next.toasts.len() > MAX_TOASTS {
                    let overflow = next.toasts.len() - MAX_TOASTS;
                    next.toasts.drain(..overflow);
                }
            }
            ToastAction::Dismiss(id) => {
                let before = next.toasts.len();
                next.toasts.retain(|t| t.id != id);
                if next.toasts.len() == before {
                    return self;
                }
            }
        }
        Rc::new(next)
    }
}

/// Handle for raising toasts from any view below [`ToastProvider`].
#[derive(Clone, PartialEq)]
pub struct Toaster(UseReducerHandle<ToastQueue>);

impl Toaster {
    pub fn success(&self, message: impl Into<String>) {
        self.0.dispatch(ToastAction::Push(ToastKind::Success, message.into()));
    }

    pub fn error(&self, message: impl Into<String>) {
        let message = message.into();
        log::warn!("error toast: {}", message);
        self.0.dispatch(ToastAction::Push(ToastKind::Error, message));
    }

    pub fn info(&self, message: impl Into<String>) {
        self.0.dispatch(ToastAction::Push(ToastKind::Info, message.into()));
    }
}

#[hook]
pub fn use_toaster() -> Toaster {
    use_context::<Toaster>().expect("use_toaster called outside ToastProvider")
}

#[derive(Properties, PartialEq)]
pub struct ToastProviderProps {
    pub children: Children,
}

#[function_component(ToastProvider)]
pub fn toast_provider(props: &ToastProviderProps) -> Html {
    let queue = use_reducer(ToastQueue::default);
    let toaster = Toaster(queue.clone());

    html! {
        <ContextProvider<Toaster> context={toaster}>
            { props.children.clone() }
            <div class="toast-stack" role="status" aria-live="polite">
                {
                    queue.toasts().iter().map(|toast| {
                        let on_close = {
                            let queue = queue.clone();
                            let id = toast.id;
                            Callback::from(move |_: ()| queue.dispatch(ToastAction::Dismiss(id)))
                        };
                        html! {
                            <ToastItem key={toast.id} toast={toast.clone()} {on_close} />
                        }
                    }).collect::<Html>()
                }
            </div>
            <style>
                {r#"
                    .toast-stack {
                        position: fixed;
                        top: 1.5rem;
                        right: 1.5rem;
                        display: flex;
                        flex-direction: column;
                        gap: 0.75rem;
                        z-index: 2000;
                    }
                    .toast {
                        min-width: 260px;
                        max-width: 360px;
                        padding: 0.9rem 1.2rem;
                        border-radius: 10px;
                        color: #fff;
                        display: flex;
                        justify-content: space-between;
                        align-items: center;
                        gap: 1rem;
                        box-shadow: 0 8px 24px rgba(0, 0, 0, 0.25);
                        animation: toastIn 0.25s ease-out;
                    }
                    .toast.success { background: #1f7a4d; }
                    .toast.error { background: #b3261e; }
                    .toast.info { background: #2b3a55; }
                    .toast button {
                        background: none;
                        border: none;
                        color: inherit;
                        font-size: 1.1rem;
                        cursor: pointer;
                    }
                    @keyframes toastIn {
                        from { transform: translateY(-10px); opacity: 0; }
                        to { transform: translateY(0); opacity: 1; }
                    }
                    @media (max-width: 600px) {
                        .toast-stack { left: 1rem; right: 1rem; top: 1rem; }
                        .toast { max-width: none; }
                    }
                "#}
            </style>
        </ContextProvider<Toaster>>
    }
}

#[derive(Properties, PartialEq)]
struct ToastItemProps {
    toast: Toast,
    on_close: Callback<()>,
}

#[function_component(ToastItem)]
fn toast_item(props: &ToastItemProps) -> Html {
    {
        let on_close = props.on_close.clone();
        use_effect_with_deps(
            move |_| {
                let timer = ScopedTimer::start(&GlooTimers, TOAST_VISIBLE_MS, move || on_close.emit(()));
                move || drop(timer)
            },
            props.toast.id,
        );
    }

    let close = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };

    html! {
        <div class={props.toast.kind.class()}>
            <span>{ &props.toast.message }</span>
            <button onclick={close} aria-label="Dismiss">{"×"}</button>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn push(queue: Rc<ToastQueue>, msg: &str) -> Rc<ToastQueue> {
        queue.reduce(ToastAction::Push(ToastKind::Info, msg.to_string()))
    }

    #[test]
    fn keeps_only_the_newest_toasts() {
        let mut queue = Rc::new(ToastQueue::default());
        for msg in ["a", "b", "c", "d", "e"] {
            queue = push(queue, msg);
        }
        let messages: Vec<&str> = queue.toasts().iter().map(|t| t.message.as_str()).collect();
        assert_eq!(messages, vec!["c", "d", "e"]);
    }

    #[test]
    fn dismiss_removes_by_id() {
        let queue = push(push(Rc::new(ToastQueue::default()), "saved"), "failed");
        let first = queue.toasts()[0].id;
        let queue = queue.reduce(ToastAction::Dismiss(first));
        assert_eq!(queue.toasts().len(), 1);
        assert_eq!(queue.toasts()[0].message, "failed");
    }

    #[test]
    fn dismissing_unknown_id_is_a_no_op() {
        let queue = push(Rc::new(ToastQueue::default()), "x");
        let same = queue.clone().reduce(ToastAction::Dismiss(999));
        assert!(Rc::ptr_eq(&queue, &same));
    }
}
