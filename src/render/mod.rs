pub mod layout;
pub mod surface;
pub mod svg;
pub mod page;
pub mod recording;
pub mod html_file;
pub mod channel;

pub use layout::{Layout, LayoutRow};
pub use surface::{Surface, SurfaceEvent};
pub use svg::render_chart_svg;
pub use page::{html_escape, meta_refresh, render_layout_html, render_page};
pub use recording::RecordingSurface;
pub use html_file::HtmlFileSurface;
pub use channel::ChannelSurface;
