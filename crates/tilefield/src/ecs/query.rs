//! # Query — Aspects Over Component Types
//!
//! A query names the component types an entity must carry (its *aspect*):
//!
//! ```ignore
//! // Closure form: borrow the components of every match.
//! world.query::<(&mut Displayable, &Dimensions)>(|entity, (display, dims)| { ... });
//!
//! // Handle form: just the entities, lazily, restartable.
//! for area in world.entities_matching::<(&TileGrid, &Name)>() { ... }
//! ```
//!
//! The closure form pulls the needed columns out of an archetype's map,
//! iterates the rows, and puts them back. Taking the columns out by value is
//! what lets `&A` and `&mut B` coexist without aliasing.

use std::any::TypeId;
use std::collections::HashMap;

use super::component::{Component, ComponentColumn};

/// Something that can be fetched per row from an archetype.
///
/// Implemented for `&T`, `&mut T`, and tuples of those.
pub trait QueryParam {
    type Item<'w>;

    /// Columns taken out of the archetype for the duration of the query.
    type Column;

    fn type_ids() -> Vec<TypeId>;

    fn extract(columns: &mut HashMap<TypeId, ComponentColumn>) -> Self::Column;

    fn restore(col: Self::Column, columns: &mut HashMap<TypeId, ComponentColumn>);

    fn fetch(col: &mut Self::Column, index: usize) -> Self::Item<'_>;
}

fn take_column<T: Component>(
    columns: &mut HashMap<TypeId, ComponentColumn>,
) -> (TypeId, ComponentColumn) {
    let tid = TypeId::of::<T>();
    let col = columns.remove(&tid).unwrap_or_else(|| {
        panic!(
            "query matched an archetype without a `{}` column",
            std::any::type_name::<T>()
        )
    });
    (tid, col)
}

impl<T: Component> QueryParam for &T {
    type Item<'w> = &'w T;
    type Column = (TypeId, ComponentColumn);

    fn type_ids() -> Vec<TypeId> {
        vec![TypeId::of::<T>()]
    }

    fn extract(columns: &mut HashMap<TypeId, ComponentColumn>) -> Self::Column {
        take_column::<T>(columns)
    }

    fn restore(col: Self::Column, columns: &mut HashMap<TypeId, ComponentColumn>) {
        columns.insert(col.0, col.1);
    }

    fn fetch(col: &mut Self::Column, index: usize) -> Self::Item<'_> {
        col.1.get::<T>(index)
    }
}

impl<T: Component> QueryParam for &mut T {
    type Item<'w> = &'w mut T;
    type Column = (TypeId, ComponentColumn);

    fn type_ids() -> Vec<TypeId> {
        vec![TypeId::of::<T>()]
    }

    fn extract(columns: &mut HashMap<TypeId, ComponentColumn>) -> Self::Column {
        take_column::<T>(columns)
    }

    fn restore(col: Self::Column, columns: &mut HashMap<TypeId, ComponentColumn>) {
        columns.insert(col.0, col.1);
    }

    fn fetch(col: &mut Self::Column, index: usize) -> Self::Item<'_> {
        col.1.get_mut::<T>(index)
    }
}

macro_rules! impl_query_param_tuple {
    ($($P:ident),+) => {
        impl<$($P: QueryParam),+> QueryParam for ($($P,)+) {
            type Item<'w> = ($($P::Item<'w>,)+);
            type Column = ($($P::Column,)+);

            fn type_ids() -> Vec<TypeId> {
                let mut ids = Vec::new();
                $(ids.extend($P::type_ids());)+
                ids
            }

            fn extract(columns: &mut HashMap<TypeId, ComponentColumn>) -> Self::Column {
                ($($P::extract(columns),)+)
            }

            #[allow(non_snake_case)]
            fn restore(col: Self::Column, columns: &mut HashMap<TypeId, ComponentColumn>) {
                let ($($P,)+) = col;
                $($P::restore($P, columns);)+
            }

            #[allow(non_snake_case)]
            fn fetch(col: &mut Self::Column, index: usize) -> Self::Item<'_> {
                let ($($P,)+) = col;
                ($($P::fetch($P, index),)+)
            }
        }
    };
}

impl_query_param_tuple!(A);
impl_query_param_tuple!(A, B);
impl_query_param_tuple!(A, B, C);
impl_query_param_tuple!(A, B, C, D);
impl_query_param_tuple!(A, B, C, D, E);
