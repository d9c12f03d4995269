//! Page Sections

mod ai_tools;
mod chat_widget;
mod dashboard;
mod footer;
mod header;
mod hero;
mod testimonials;

pub use ai_tools::AiToolsSection;
pub use chat_widget::ChatWidget;
pub use dashboard::DashboardSection;
pub use footer::Footer;
pub use header::Header;
pub use hero::HeroSection;
pub use testimonials::Testimonials;
