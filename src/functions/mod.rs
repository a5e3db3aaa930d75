//! Read operations built on [`EnsFunction`](crate::function::EnsFunction).
//!
//! Each operation can be called on its own or batched with others.

mod addr;
pub use addr::{GetAddr, GetAddrArgs};

mod resolver;
pub use resolver::GetResolver;

mod text;
pub use text::{GetText, GetTextArgs};

mod wrapper;
pub use wrapper::{GetWrapperData, GetWrapperName, WrapperData};
