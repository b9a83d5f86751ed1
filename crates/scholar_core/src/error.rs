use thiserror::Error;

use crate::models::WorkflowStatus;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FieldEditError {
    #[error("field '{0}' is fixed at creation and cannot be edited")]
    Immutable(String),

    #[error("contribution is {} and no longer editable", .0.as_str())]
    Terminal(WorkflowStatus),
}
