//! Value objects exchanged with the host editor and the request builder

pub mod diagnostic;
pub mod request;

pub use diagnostic::{Diagnostic, DiagnosticKind};
pub use request::{
    ApiKeyLocation, AuthModel, BodyModel, FormField, FormFieldType, KeyValue, ParsedRequest,
    RawLanguage, UrlModel,
};
