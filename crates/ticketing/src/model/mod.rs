use thiserror::Error;

#[macro_use]
mod macros {
    /// Text-backed enum stored as a `TEXT` column and serialized as its snake_case name.
    macro_rules! string_enum {
        ($(#[$meta:meta])* $name:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
            $(#[$meta])*
            #[derive(
                Debug,
                Clone,
                Copy,
                PartialEq,
                Eq,
                Hash,
                PartialOrd,
                Ord,
                serde::Serialize,
                serde::Deserialize,
                utoipa::ToSchema,
            )]
            pub enum $name {
                $(
                    #[serde(rename = $text)]
                    $variant,
                )+
            }

            impl $name {
                pub const ALL: &'static [$name] = &[$($name::$variant),+];

                pub fn as_str(&self) -> &'static str {
                    match self {
                        $($name::$variant => $text,)+
                    }
                }
            }

            impl std::fmt::Display for $name {
                fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                    f.write_str(self.as_str())
                }
            }

            impl std::str::FromStr for $name {
                type Err = $crate::model::ParseEnumError;

                fn from_str(s: &str) -> Result<Self, Self::Err> {
                    match s {
                        $($text => Ok($name::$variant),)+
                        other => Err($crate::model::ParseEnumError {
                            kind: stringify!($name),
                            value: other.to_string(),
                        }),
                    }
                }
            }

            impl TryFrom<String> for $name {
                type Error = $crate::model::ParseEnumError;

                fn try_from(value: String) -> Result<Self, Self::Error> {
                    value.parse()
                }
            }
        };
    }
}

pub mod event;
pub mod order;
pub mod role;
pub mod ticket;
pub mod user;
pub mod vendor;

pub use self::event::{Event, EventCategory, EventStatus, EventType};
pub use self::order::{NewOrder, Order, PaymentMethod, PaymentStatus};
pub use self::role::{Role, RoleSet, has_any_role, has_role};
pub use self::ticket::{NewTicket, Ticket, TicketStatus, TicketType, TransitionError};
pub use self::user::User;
pub use self::vendor::Vendor;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid {kind} value '{value}'")]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
}
