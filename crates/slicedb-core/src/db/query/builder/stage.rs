//! Stage and facade markers.
//!
//! Markers are uninhabited types: they exist only in `SliceQuery`'s type
//! parameters and decide which methods are callable.

use crate::db::query::descriptor::SliceKind;

#[allow(unreachable_pub)]
mod sealed {
    pub trait Sealed {}
}

///
/// Stage
/// Position of a builder in the call chain.
///

pub trait Stage: sealed::Sealed {}

///
/// Filtered
/// Any stage after the partition key: terminals and common setters live here.
///

pub trait Filtered: Stage {}

///
/// Ranged
/// Stages holding a from/to clustering range; only these accept bounding modes.
///

pub trait Ranged: Filtered {}

macro_rules! stages {
    ($($(#[$meta:meta])* $name:ident: [$($bound:ident),*];)*) => {
        $(
            $(#[$meta])*
            #[derive(Debug)]
            pub enum $name {}

            impl sealed::Sealed for $name {}
            impl Stage for $name {}
            $(impl $bound for $name {})*
        )*
    };
}

stages! {
    /// Nothing bound yet.
    Start: [];
    /// Partition components bound, no clustering filter.
    Partitioned: [Filtered];
    /// Lower clustering bound only.
    RangeFrom: [Filtered, Ranged];
    /// Upper clustering bound only.
    RangeTo: [Filtered, Ranged];
    /// Both clustering bounds.
    RangeBoth: [Filtered, Ranged];
    /// Exact clustering prefix.
    Exact: [Filtered];
    /// Exact clustering prefix followed by an IN list.
    ExactIn: [Filtered];
}

///
/// Facade
/// Terminal family a builder was opened for.
///

pub trait Facade: sealed::Sealed {
    const KIND: SliceKind;
}

/// Facades that return rows and therefore accept ordering and limits.
pub trait ReadFacade: Facade {}

/// Facades that page through results.
pub trait PagedFacade: ReadFacade {}

/// Facades whose terminals return futures and accept listeners.
pub trait AsyncFacade: Facade {}

macro_rules! facades {
    ($($name:ident => $kind:ident: [$($bound:ident),*];)*) => {
        $(
            #[derive(Debug)]
            pub enum $name {}

            impl sealed::Sealed for $name {}
            impl Facade for $name {
                const KIND: SliceKind = SliceKind::$kind;
            }
            $(impl $bound for $name {})*
        )*
    };
}

facades! {
    Select => Select: [ReadFacade];
    Iterate => Iterate: [ReadFacade, PagedFacade];
    Delete => Delete: [];
    AsyncSelect => Select: [ReadFacade, AsyncFacade];
    AsyncIterate => Iterate: [ReadFacade, PagedFacade, AsyncFacade];
    AsyncDelete => Delete: [AsyncFacade];
}
