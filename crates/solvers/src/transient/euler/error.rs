use std::error::Error as StdError;

type Source = Box<dyn StdError + Send + Sync>;

/// A failure during Euler integration, tagged with the step that broke.
///
/// Step 0 is the evaluation at the initial input. Step `n` is the `n`th
/// advance from it, whether the failure came from extracting the state,
/// rebuilding the input, or calling the model at the new input.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("model failed at step {step}: {source}")]
    Model {
        step: usize,
        #[source]
        source: Source,
    },

    #[error("problem failed at step {step}: {source}")]
    Problem {
        step: usize,
        #[source]
        source: Source,
    },
}

impl Error {
    /// The step at which the run failed.
    #[must_use]
    pub fn step(&self) -> usize {
        match self {
            Self::Model { step, .. } | Self::Problem { step, .. } => *step,
        }
    }

    pub(crate) fn model<E>(step: usize) -> impl FnOnce(E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        move |err| Self::Model {
            step,
            source: Box::new(err),
        }
    }

    pub(crate) fn problem<E>(step: usize) -> impl FnOnce(E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        move |err| Self::Problem {
            step,
            source: Box::new(err),
        }
    }
}
