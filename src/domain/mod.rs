//! Domain layer - Form controllers and the capabilities they depend on

pub mod controller;
pub mod error;
pub mod form;
pub mod metrics;
pub mod navigation;
pub mod page;
pub mod status;
pub mod submission;

pub use controller::{ControllerState, FormController};
pub use error::SubmissionError;
pub use form::{
    AuthForm, FormInput, FormKind, FormTexts, PasswordResetForm, RegistrationForm, SignInForm,
    UserType, ValidationError,
};
pub use navigation::{follow, link_target, LinkTarget, Navigation, PageLink, Routes};
pub use page::{ControlState, FormPage};
pub use status::{Severity, StatusMessage, StatusMessenger};
pub use submission::{SubmissionEndpoint, SubmissionOutcome, Submitter};
