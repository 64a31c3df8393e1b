use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use super::*;
use crate::matrix::model::{EcLevel, ModuleMatrix};

struct FixedEncoder;

impl QrEncoder for FixedEncoder {
    fn encode(&self, _data: &str, _ec: EcLevel) -> crate::foundation::error::QuirlResult<ModuleMatrix> {
        ModuleMatrix::new(21, vec![false; 441])
    }
}

#[test]
fn factory_runs_once_across_threads() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counted = calls.clone();
    let cell = Arc::new(EncoderCell::new(Box::new(move || {
        counted.fetch_add(1, Ordering::SeqCst);
        Ok(Arc::new(FixedEncoder) as Arc<dyn QrEncoder>)
    })));

    let mut handles = Vec::new();
    for _ in 0..8 {
        let cell = cell.clone();
        handles.push(std::thread::spawn(move || {
            cell.get().unwrap();
        }));
    }
    for h in handles {
        h.join().unwrap();
    }

    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn failed_initialization_is_retried() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counted = calls.clone();
    let cell = EncoderCell::new(Box::new(move || {
        if counted.fetch_add(1, Ordering::SeqCst) == 0 {
            Err(crate::foundation::error::QuirlError::encoding("cold start"))
        } else {
            Ok(Arc::new(FixedEncoder) as Arc<dyn QrEncoder>)
        }
    }));

    assert!(cell.get().is_err());
    assert!(cell.get().is_ok());
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[test]
fn ready_cell_never_calls_a_factory() {
    let cell = EncoderCell::ready(Arc::new(FixedEncoder));
    assert!(cell.get().is_ok());
}
