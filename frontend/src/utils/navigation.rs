/// Full-page navigation, skipped when the browser is already on `path`.
pub fn redirect_to(path: &str) {
    if let Some(window) = web_sys::window() {
        let location = window.location();
        if let Ok(pathname) = location.pathname() {
            if pathname == path {
                return;
            }
        }
        let _ = location.set_href(path);
    }
}
