//! Macros for ergonomic identifier declaration.

/// Declare a fieldless enum usable as a state identifier.
///
/// The enum derives `Clone`, `Copy`, `PartialEq`, `Eq`, `Hash`, `Debug`
/// and serde's `Serialize`/`Deserialize`, and implements
/// [`StateId`](crate::core::StateId) with each variant's name as its
/// display form. The calling crate must depend on `serde`.
///
/// # Example
///
/// ```
/// use statecraft::state_id;
/// use statecraft::core::StateId;
///
/// state_id! {
///     pub enum EnemyState {
///         Idle,
///         Patrol,
///         Chase,
///     }
/// }
///
/// assert_eq!(EnemyState::Chase.name(), "Chase");
/// ```
#[macro_export]
macro_rules! state_id {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            Debug,
            serde::Serialize,
            serde::Deserialize
        )]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $crate::core::StateId for $name {
            fn name(&self) -> &str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }
        }
    };
}
