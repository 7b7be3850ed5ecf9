//! Page header.

use yew::prelude::*;

#[function_component(Header)]
pub fn header() -> Html {
    html! {
        <header class="site-header">
            <span class="site-logo">{ "levity" }</span>
            <nav class="site-nav">
                <a href="#services">{ "Services" }</a>
                <a href="#work">{ "Work" }</a>
                <a href="#contact">{ "Contact" }</a>
            </nav>
        </header>
    }
}
