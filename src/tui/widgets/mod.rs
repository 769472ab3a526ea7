pub mod banners;
pub mod calendar;
pub mod countdown;
pub mod district_picker;
pub mod donations;
pub mod header;
pub mod quote;
pub mod status_banner;
pub mod statusbar;
pub mod tasbih;
