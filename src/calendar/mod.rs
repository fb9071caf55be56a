mod header;
mod month;
mod numpad;
mod util;
mod years;
pub(crate) use self::header::RangeHeader;
pub(crate) use self::month::MonthView;
pub(crate) use self::numpad::DurationPopup;
pub(crate) use self::util::{BufferCanvas, ACS_HLINE};
pub(crate) use self::years::YearList;
