//! Hero section carrying most of the physics targets.

use yew::prelude::*;

#[function_component(Hero)]
pub fn hero() -> Html {
    html! {
        <section class="hero">
            <h1 class="hero-title" data-physics="hero-title">
                { "Build Weightless Experiences" }
            </h1>
            <p class="hero-subtitle" data-physics="hero-subtitle">
                { "Modern web engineering for products that feel alive." }
            </p>
            <div class="hero-actions">
                <button class="cta cta-primary" data-physics="cta-button-1">
                    { "Start a Project" }
                </button>
                <button class="cta cta-secondary" data-physics="cta-button-2">
                    { "See Our Work" }
                </button>
            </div>
        </section>
    }
}
