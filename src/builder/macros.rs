//! Macros for declaring state and action enums.

/// Declare an enum whose variants are states or actions.
///
/// Generates the enum (deriving `Clone`, `PartialEq`, `Debug`, `Serialize`
/// and `Deserialize`), an implementation of [`State`](crate::core::State) or
/// [`Action`](crate::core::Action) mapping each variant to its label, and a
/// [`Catalog`](crate::core::Catalog) whose payload shapes are taken from the
/// variant fields.
///
/// # Example
///
/// ```
/// use statecraft::core::{Action, Catalog, State};
/// use statecraft::fsm_enum;
///
/// fsm_enum! {
///     pub enum Tank: State {
///         Empty => "empty",
///         Filling { litres: u32 } => "filling",
///     }
/// }
///
/// fsm_enum! {
///     pub enum Valve: Action {
///         Open { rate: u32 } => "open",
///         Close => "close",
///     }
/// }
///
/// assert_eq!(Tank::Filling { litres: 3 }.name(), "filling");
/// assert_eq!(Valve::Close.name(), "close");
///
/// let catalog = Tank::catalog();
/// assert_eq!(catalog[1].shape.fields()[0].name, "litres");
/// assert_eq!(catalog[1].shape.fields()[0].kind, "u32");
/// ```
#[macro_export]
macro_rules! fsm_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident : $kind:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $({ $($field:ident : $fty:ty),* $(,)? })? => $label:literal
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Debug, serde::Serialize, serde::Deserialize)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant $({ $($field : $fty),* })?
            ),*
        }

        impl $crate::core::$kind for $name {
            fn name(&self) -> &str {
                match self {
                    $(Self::$variant { .. } => $label),*
                }
            }
        }

        impl $crate::core::Catalog for $name {
            fn catalog() -> ::std::vec::Vec<$crate::core::Descriptor> {
                ::std::vec![
                    $(
                        $crate::core::Descriptor::new(
                            $label,
                            $crate::core::PayloadShape::new()
                                $($(.field(stringify!($field), stringify!($fty)))*)?,
                        )
                    ),*
                ]
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::core::{Action, Catalog, State};

    fsm_enum! {
        enum Phase: State {
            Idle => "idle",
            Loading { url: String, attempt: u8 } => "loading",
            Failed { reason: String } => "failed",
        }
    }

    fsm_enum! {
        enum Event: Action {
            Fetch { url: String } => "fetch",
            Retry => "retry",
        }
    }

    #[test]
    fn fsm_enum_generates_names() {
        assert_eq!(Phase::Idle.name(), "idle");
        assert_eq!(
            Phase::Loading {
                url: "a".to_string(),
                attempt: 1
            }
            .name(),
            "loading"
        );
        assert_eq!(Event::Retry.name(), "retry");
    }

    #[test]
    fn fsm_enum_generates_catalog() {
        let catalog = Phase::catalog();
        let names: Vec<_> = catalog.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["idle", "loading", "failed"]);

        assert!(catalog[0].shape.is_empty());
        let fields: Vec<_> = catalog[1]
            .shape
            .fields()
            .iter()
            .map(|f| (f.name.as_str(), f.kind.as_str()))
            .collect();
        assert_eq!(fields, vec![("url", "String"), ("attempt", "u8")]);

        assert_eq!(Event::catalog().len(), 2);
    }

    #[test]
    fn fsm_enum_supports_visibility_and_attributes() {
        fsm_enum! {
            /// Documented enum
            #[derive(Eq)]
            pub enum Flag: State {
                #[serde(rename = "up")]
                Up => "up",
                Down => "down",
            }
        }

        assert_eq!(Flag::Up, Flag::Up);
        assert_eq!(Flag::catalog().len(), 2);
    }
}
