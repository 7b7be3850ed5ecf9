//! Page footer.

use yew::prelude::*;

#[function_component(Footer)]
pub fn footer() -> Html {
    html! {
        <footer class="site-footer">
            <span>{ "© 2026 levity — weightless by design" }</span>
        </footer>
    }
}
