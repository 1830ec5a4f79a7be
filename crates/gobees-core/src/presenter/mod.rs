//! Per-screen use-case controllers.
//!
//! One presenter instance binds one conceptual screen to the repository:
//! it translates user intents into repository calls and repository
//! outcomes into display instructions, guarding every display update
//! behind the view's liveness check.

pub mod apiary;
pub mod contract;
pub mod hive;

pub use apiary::ApiaryPresenter;
pub use contract::{
    ApiaryView, BaseView, HiveView, ERROR_RECORDING_TOO_SHORT, ERROR_SAVING_RECORDING,
    REQUEST_ADD_EDIT_HIVE, REQUEST_MONITORING, RESULT_CANCELED, RESULT_OK,
};
pub use hive::HivePresenter;
