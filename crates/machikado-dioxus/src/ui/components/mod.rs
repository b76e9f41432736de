pub mod area_page;
pub mod blog_page;
pub mod error_screen;
pub mod header;
pub mod home_page;
pub mod map_widget;
pub mod markdown_view;
pub mod nav_link;
pub mod not_found;
pub mod post_meta;
pub mod post_page;
pub mod shop_page;
pub mod sidebar;
pub mod tag_display;

pub use area_page::{AreaPage, AreaView};
pub use blog_page::{BlogPage, BlogView};
pub use error_screen::ErrorScreen;
pub use header::{Crumb, Header};
pub use home_page::{HomePage, HomeView};
pub use map_widget::{MapBody, MapWidget};
pub use markdown_view::MarkdownView;
pub use nav_link::NavLink;
pub use not_found::{NotFoundPage, NotFoundView};
pub use post_meta::PostMeta;
pub use post_page::{PostPage, PostView};
pub use shop_page::{ShopPage, ShopView};
pub use sidebar::{MobileSidebar, PcSidebar};
pub use tag_display::{TagDisplay, TagList};
