pub type SieveResult<T> = Result<T, SieveError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SieveErrorCategory {
    InputValidationError,
    IoSystemError,
    ComputationError,
    InternalError,
}

impl SieveErrorCategory {
    pub const fn exit_code(self) -> i32 {
        match self {
            Self::InputValidationError => 2,
            Self::IoSystemError => 3,
            Self::ComputationError => 4,
            Self::InternalError => 5,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InputValidationError => "InputValidationError",
            Self::IoSystemError => "IoSystemError",
            Self::ComputationError => "ComputationError",
            Self::InternalError => "InternalError",
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SieveError {
    #[error("weight {position} '{token}' is not a non-negative number")]
    Parse { token: String, position: usize },

    #[error("expected exactly {expected} weight values (including pan), got {actual}")]
    CountMismatch { expected: usize, actual: usize },

    #[error("total retained weight is zero; gradation percentages are undefined")]
    DegenerateInput,

    #[error("{message}")]
    Io {
        placeholder: &'static str,
        message: String,
    },

    #[error("{message}")]
    Internal {
        placeholder: &'static str,
        message: String,
    },
}

impl SieveError {
    pub fn io_system(placeholder: &'static str, message: impl Into<String>) -> Self {
        Self::Io {
            placeholder,
            message: message.into(),
        }
    }

    pub fn internal(placeholder: &'static str, message: impl Into<String>) -> Self {
        Self::Internal {
            placeholder,
            message: message.into(),
        }
    }

    pub const fn category(&self) -> SieveErrorCategory {
        match self {
            Self::Parse { .. } | Self::CountMismatch { .. } => {
                SieveErrorCategory::InputValidationError
            }
            Self::DegenerateInput => SieveErrorCategory::ComputationError,
            Self::Io { .. } => SieveErrorCategory::IoSystemError,
            Self::Internal { .. } => SieveErrorCategory::InternalError,
        }
    }

    pub const fn placeholder(&self) -> &'static str {
        match self {
            Self::Parse { .. } => "INPUT.WEIGHT_TOKEN",
            Self::CountMismatch { .. } => "INPUT.WEIGHT_COUNT",
            Self::DegenerateInput => "RUN.ZERO_TOTAL_MASS",
            Self::Io { placeholder, .. } | Self::Internal { placeholder, .. } => *placeholder,
        }
    }

    pub const fn exit_code(&self) -> i32 {
        self.category().exit_code()
    }

    pub fn diagnostic_line(&self) -> String {
        format!("ERROR: [{}] {}", self.placeholder(), self)
    }

    pub fn fatal_exit_line(&self) -> String {
        format!("FATAL EXIT CODE: {}", self.exit_code())
    }
}
