//! Method interception.
//!
//! A type opts in by implementing [`Interceptable`], registering its
//! callable members in a [`MethodTable`]. A [`Decorator`] holding an
//! ordered wrapper chain turns that type into a [`DecoratedClass`]; every
//! instance constructed through it is an [`Intercepted`] value whose calls
//! are routed through the chain.
//!
//! ```text
//! decorate([w0, w1]) --apply::<T>()--> DecoratedClass<T> --construct(t)--> Intercepted<T>
//!                                           |                                  |
//!                             prototype table (built once)       own members + stand-ins
//!                                                                 (built per instance)
//! ```
//!
//! Member kinds are declared at registration (`sync_method` /
//! `async_method`), so dispatch never inspects a value at run time.

mod decorator;
mod dispatch;
mod intercepted;
mod table;


pub use decorator::{decorate, DecoratedClass, Decorator};
pub use dispatch::Chain;
pub use intercepted::{Intercepted, Outcome};
pub use table::{AsyncFn, Member, Method, MethodTable, SyncFn};

/// Reserved member name. Construction logic is never intercepted.
pub const CONSTRUCTOR: &str = "constructor";

/// A type whose methods can be intercepted.
///
/// # Example
///
/// ```ignore
/// impl Interceptable for Calculator {
///     const CLASS_NAME: &'static str = "Calculator";
///
///     fn prototype(table: &mut MethodTable<Self>) {
///         table
///             .sync_method("add", |_, args| to_value(arg::<i64>(&args, 0)? + arg::<i64>(&args, 1)?))
///             .field("precision");
///     }
/// }
/// ```
pub trait Interceptable: std::any::Any + Send + Sync + Sized {
    /// Base name used in every source label.
    const CLASS_NAME: &'static str;

    /// Register type-level methods. Called once per decorated type.
    fn prototype(table: &mut MethodTable<Self>);

    /// Register members bound to this instance, typically closures that
    /// capture state chosen at construction. Called once per instance.
    ///
    /// An own member shadows a prototype member of the same name.
    fn own_members(&self, _table: &mut MethodTable<Self>) {}
}
