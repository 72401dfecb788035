use super::error::{Error, Result};
use super::transfer::{control_in, control_out, ControlSetup, ControlTransfer};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "dir", rename_all = "lowercase")]
pub enum Step {
    Out {
        request_type: u8,
        request: u8,
        #[serde(default)]
        value: u16,
        #[serde(default)]
        index: u16,
        #[serde(default)]
        data: Option<String>,
    },
    In {
        request_type: u8,
        request: u8,
        #[serde(default)]
        value: u16,
        #[serde(default)]
        index: u16,
        length: u16,
    },
}

impl Step {
    pub fn setup(&self) -> ControlSetup {
        match *self {
            Step::Out {
                request_type,
                request,
                value,
                index,
                ..
            }
            | Step::In {
                request_type,
                request,
                value,
                index,
                ..
            } => ControlSetup::new(request_type, request, value, index),
        }
    }
}

pub fn parse_script(json: &str) -> Result<Vec<Step>> {
    Ok(serde_json::from_str(json)?)
}

pub fn load_script(path: &Path) -> Result<Vec<Step>> {
    let contents = std::fs::read_to_string(path)?;
    parse_script(&contents)
}

/// Run `steps` in order. `on_in` receives the step index and the bytes of
/// every IN transfer. The first failure stops the replay.
pub fn replay<D, F>(dev: &D, steps: &[Step], timeout: Duration, mut on_in: F) -> Result<()>
where
    D: ControlTransfer + ?Sized,
    F: FnMut(usize, &[u8]),
{
    for (index, step) in steps.iter().enumerate() {
        let outcome = match step {
            Step::Out { data, .. } => control_out(dev, step.setup(), data.as_deref(), timeout),
            Step::In { length, .. } => {
                control_in(dev, step.setup(), *length, timeout).map(|bytes| on_in(index, &bytes))
            }
        };
        outcome.map_err(|e| Error::Step {
            index,
            source: Box::new(e),
        })?;
    }
    Ok(())
}
