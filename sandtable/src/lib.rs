pub mod dispatch;
pub mod element;
pub mod event;
pub mod hit;
pub mod layout;
pub mod render;
pub mod table;
pub mod terminal;
pub mod text;

pub use dispatch::Dispatcher;
pub use element::{find_element, Content, Element};
pub use event::{process_events, Event, Key, Modifiers, MouseButton};
pub use hit::hit_test;
pub use layout::{LayoutResult, Rect};
pub use render::{render_table, Screen};
pub use table::{
    sort_by_column, Column, NumericMode, SortDirection, SortState, TableError, TableModel,
};
pub use terminal::Terminal;
