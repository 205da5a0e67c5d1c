mod common;
mod progress;
mod reconciler;
