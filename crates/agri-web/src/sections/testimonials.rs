use leptos::prelude::*;

use crate::content::TESTIMONIALS;

#[component]
pub fn Testimonials() -> impl IntoView {
    view! {
        <section id="testimonials" class="testimonials">
            <h2>"What Farmers Say"</h2>
            <div class="testimonial-grid">
                {TESTIMONIALS
                    .iter()
                    .map(|t| {
                        view! {
                            <figure class="testimonial">
                                <blockquote>{t.quote}</blockquote>
                                <figcaption>
                                    <span class="author">{t.author}</span>
                                    <span class="location">{t.location}</span>
                                </figcaption>
                            </figure>
                        }
                    })
                    .collect_view()}
            </div>
        </section>
    }
}
