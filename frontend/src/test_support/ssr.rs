use leptos::*;

use super::helpers::{provide_fakes, FakeAuthApi, RecordingNavigator};

pub fn with_runtime<T>(f: impl FnOnce() -> T) -> T {
    let runtime = leptos::create_runtime();
    let result = f();
    runtime.dispose();
    result
}

pub fn render_to_string<F, N>(view: F) -> String
where
    F: FnOnce() -> N + 'static,
    N: IntoView + 'static,
{
    leptos_reactive::suppress_resource_load(true);
    let html = with_runtime(|| {
        leptos_meta::provide_meta_context();
        view().into_view().render_to_string().to_string()
    });
    leptos_reactive::suppress_resource_load(false);
    html
}

/// Renders with a fake session API and a recording navigator in context.
pub fn render_with_fakes<F, N>(api: FakeAuthApi, view: F) -> (String, RecordingNavigator)
where
    F: FnOnce() -> N + 'static,
    N: IntoView + 'static,
{
    let recorder = std::rc::Rc::new(std::cell::RefCell::new(None));
    let slot = recorder.clone();
    let html = render_to_string(move || {
        *slot.borrow_mut() = Some(provide_fakes(api));
        view()
    });
    let nav = recorder.borrow_mut().take().unwrap_or_default();
    (html, nav)
}
