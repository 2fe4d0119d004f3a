//! Contract shared by every record that can be listed in a data table.

use crate::domain::types::TypeConstraintError;

/// One record of a remote table.
///
/// The table name is fixed by the implementing type, so a controller or a
/// repository parameterised over `T: Row` always knows which table it talks
/// to. `New` and `Update` are the validated payloads accepted by writers.
pub trait Row: Clone {
    /// Name of the backing table.
    const TABLE: &'static str;

    /// Typed primary key.
    type Id: Copy + Into<i32> + TryFrom<i32, Error = TypeConstraintError> + PartialEq;

    /// Payload used to create a new record.
    type New;

    /// Payload used to replace the editable fields of a record.
    type Update;

    fn id(&self) -> Self::Id;

    /// Text representation of a named field, used by column accessors.
    /// Returns `None` for unknown keys; empty optional fields render as `""`.
    fn field(&self, key: &str) -> Option<String>;
}
