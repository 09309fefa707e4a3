//! Declaration text formatting
//!
//! Text pulled out of member tables often arrives with the space between a
//! type and an identifier missing. This module puts it back:
//!
//! - `format_parameter`: one `TypeName` + `identifier` fragment
//! - `format_signature`: a whole `name(params) qualifiers` declaration
//! - `Boundary`: the ordered detector rules behind both

mod boundary;
mod declaration;

pub use boundary::{find_boundary, Boundary};
pub use declaration::{format_parameter, format_signature, split_parameters};
