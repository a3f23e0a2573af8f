//! Resource interfaces
//!
//! Each resource exposes friendly methods (scalar arguments, decoded domain
//! objects, paginators) and `_raw` twins (typed or map parameters, the full
//! [`RawResponse`](crate::http::RawResponse)). Both sit on [`ApiCore`].

mod api;
mod messages;
mod phone_numbers;
mod sim_cards;

pub use api::{item_path, unwrap_data, ApiCore, DataEnvelope, ListEndpoint, RawListResponse};
pub use messages::{Message, MessageParty, Messages, SendMessageParams};
pub use phone_numbers::{
    ListPhoneNumbersParams, PhoneNumber, PhoneNumberPaginator, PhoneNumbers,
};
pub use sim_cards::{ListSimCardsParams, SimCard, SimCardPaginator, SimCardStatus, SimCards};
