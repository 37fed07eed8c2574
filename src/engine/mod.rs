//! Headless state machines behind the dashboard's select and table controls.

pub mod gate;
pub mod multi_select;
pub mod options;
pub mod select;
pub mod sort;
pub mod table;

pub use multi_select::{AsyncMultiSelect, Choice, Chip};
pub use options::{LOAD_MORE_LABEL, OptionEntry, OptionList, OptionSource, SelectItem, SelectOption};
pub use select::{AsyncSelect, Bound};
pub use sort::{SortDirection, SortState, SortValue};
pub use table::{
    ActionOutcome, ColumnHeader, NoCallbacks, RowCallbacks, TableEngine, TableError, TableFeatures,
    TableStatus,
};
