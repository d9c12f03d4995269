//! Static page content

use crate::browser::LocationError;

pub struct Testimonial {
    pub quote: &'static str,
    pub author: &'static str,
    pub location: &'static str,
}

pub const TESTIMONIALS: [Testimonial; 3] = [
    Testimonial {
        quote: "“AgriGuru helped me pick the best crop for my land and the right market to sell. The AI is incredibly accurate.”",
        author: "Ramesh Kumar",
        location: "Tamil Nadu",
    },
    Testimonial {
        quote: "“Their disease detector saved my tomato field from blight! I uploaded a photo and got treatment advice in minutes. A lifesaver!”",
        author: "Lakshmi Patel",
        location: "Kerala",
    },
    Testimonial {
        quote: "“The market insights feature is a game-changer for my profits. I know exactly when to sell for the best price.”",
        author: "Gurpreet Singh",
        location: "Punjab",
    },
];

/// (label, anchor)
pub const NAV_LINKS: [(&str, &str); 3] = [
    ("Dashboard", "#dashboard"),
    ("AI Tools", "#ai-tools"),
    ("Testimonials", "#testimonials"),
];

pub const DEFAULT_CROP: &str = "Tomatoes";

pub const NO_IMAGE: &str = "Please upload or capture an image first.";

pub fn location_error_message(error: LocationError) -> String {
    let detail = match error {
        LocationError::Unsupported => return "Geolocation is not supported by your browser.".into(),
        LocationError::Code(1) => {
            "Please allow location access in your browser settings and refresh the page."
        }
        LocationError::Code(2) => {
            "Location information is currently unavailable. Please try again later."
        }
        LocationError::Code(3) => "The request to get your location timed out. Please try again.",
        LocationError::Code(_) => "An unknown error occurred.",
    };
    format!("Could not get your location. {detail}")
}

/// Icon for a sky condition as sent by `/api/weather`
pub fn weather_icon(condition: &str) -> &'static str {
    match condition {
        "clear" => "☀️",
        "partly_cloudy" => "🌤️",
        "fog" => "🌫️",
        "drizzle" => "🌦️",
        "rain" => "🌧️",
        "snow" => "❄️",
        "thunderstorm" => "⛈️",
        _ => "☁️",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_messages() {
        assert_eq!(
            location_error_message(LocationError::Code(1)),
            "Could not get your location. Please allow location access in your browser settings and refresh the page."
        );
        assert!(location_error_message(LocationError::Code(3)).ends_with("timed out. Please try again."));
        assert!(location_error_message(LocationError::Code(9)).ends_with("An unknown error occurred."));
        assert_eq!(
            location_error_message(LocationError::Unsupported),
            "Geolocation is not supported by your browser."
        );
    }

    #[test]
    fn test_unknown_condition_is_cloud() {
        assert_eq!(weather_icon("rain"), "🌧️");
        assert_eq!(weather_icon("cloudy"), weather_icon("mystery"));
    }
}
