//! Live weather and market price cards

use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{self, MarketPriceResult, WeatherSummary};
use crate::browser::current_position;
use crate::components::{Markdown, Spinner};
use crate::content::{DEFAULT_CROP, location_error_message, weather_icon};

#[component]
pub fn DashboardSection() -> impl IntoView {
    view! {
        <section id="dashboard" class="dashboard">
            <div class="section-heading">
                <h2>"Your Smart Farming Dashboard"</h2>
                <p>"Live data to help you make informed decisions."</p>
            </div>
            <div class="card-grid">
                <WeatherCard />
                <MarketCard />
            </div>
        </section>
    }
}

#[component]
fn WeatherCard() -> impl IntoView {
    let (weather, set_weather) = signal(None::<WeatherSummary>);
    let (error, set_error) = signal(None::<String>);

    spawn_local(async move {
        match current_position().await {
            Ok((latitude, longitude)) => match api::weather(latitude, longitude).await {
                Ok(summary) => set_weather.set(Some(summary)),
                Err(e) => set_error.set(Some(e)),
            },
            Err(e) => set_error.set(Some(location_error_message(e))),
        }
    });

    view! {
        <div class="card weather-card">
            <h3>"Live Weather"</h3>
            {move || error.get().map(|e| view! { <div class="alert alert-error">{e}</div> })}
            <Show when=move || weather.get().is_none() && error.get().is_none()>
                <Spinner label="Fetching your local weather..." />
            </Show>
            {move || weather.get().map(|w| view! { <WeatherDetails weather=w /> })}
        </div>
    }
}

#[component]
fn WeatherDetails(weather: WeatherSummary) -> impl IntoView {
    let sunrise = weather.sunrise.clone().unwrap_or_else(|| "--:--".into());
    let sunset = weather.sunset.clone().unwrap_or_else(|| "--:--".into());

    view! {
        <div class="weather-today">
            <div>
                <p class="label">"Today's Forecast"</p>
                <p class="temperature">{format!("{}{}", weather.temperature, weather.temperature_unit)}</p>
                <p class="description">{weather.description.clone()}</p>
            </div>
            <span class="weather-icon">{weather_icon(&weather.condition)}</span>
        </div>
        <ul class="weather-details">
            <li>{format!("🌡️ Feels like: {}°", weather.feels_like)}</li>
            <li>{format!("💧 Humidity: {}%", weather.humidity)}</li>
            <li>{format!("🌬️ Wind: {} {}", weather.wind_speed, weather.wind_speed_unit)}</li>
            <li>{format!("🌅 Sunrise: {sunrise}")}</li>
            <li>{format!("🌇 Sunset: {sunset}")}</li>
        </ul>
    }
}

#[component]
fn MarketCard() -> impl IntoView {
    let (query, set_query) = signal(DEFAULT_CROP.to_string());
    let (loading, set_loading) = signal(false);
    let (result, set_result) = signal(None::<MarketPriceResult>);
    let (error, set_error) = signal(None::<String>);

    let search = move || {
        let crop = query.get_untracked();
        if crop.trim().is_empty() || loading.get_untracked() {
            return;
        }
        set_loading.set(true);
        set_result.set(None);
        set_error.set(None);

        spawn_local(async move {
            match api::market_price(&crop).await {
                Ok(found) => set_result.set(Some(found)),
                Err(e) => set_error.set(Some(e)),
            }
            set_loading.set(false);
        });
    };

    search();

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        search();
    };

    view! {
        <div class="card market-card">
            <h3>"Market Price Intel"</h3>
            <form on:submit=on_submit>
                <input
                    type="text"
                    placeholder="Enter crop name (e.g., Wheat)"
                    prop:value=move || query.get()
                    on:input=move |ev| set_query.set(event_target_value(&ev))
                />
                <button type="submit" disabled=move || loading.get()>"🔍"</button>
            </form>
            <Show when=move || loading.get()>
                <Spinner label="Fetching prices with AI..." />
            </Show>
            {move || error.get().map(|e| view! { <div class="alert alert-error">{e}</div> })}
            {move || result.get().map(|r| view! { <MarketResult result=r /> })}
        </div>
    }
}

#[component]
fn MarketResult(result: MarketPriceResult) -> impl IntoView {
    let sources = (!result.sources.is_empty()).then(|| {
        view! {
            <h4>"Sources:"</h4>
            <ul class="sources">
                {result
                    .sources
                    .iter()
                    .map(|source| {
                        view! {
                            <li>
                                <a href=source.uri.clone() target="_blank" rel="noopener noreferrer">
                                    {source.label()}
                                </a>
                            </li>
                        }
                    })
                    .collect_view()}
            </ul>
        }
    });

    view! {
        <div class="market-result">
            <Markdown text=result.price_info.clone() />
            {sources}
        </div>
    }
}
