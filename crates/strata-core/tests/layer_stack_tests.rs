//! Tests for layer stack bookkeeping across sequences of mutations.

use std::collections::BTreeSet;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use strata_core::{
    Checkerboard, Image, LayerStack, OperationKind, SharedLayerStack, StackConfig, StrataError,
};
use tracing_subscriber::EnvFilter;

/// Route the stack's `debug!` events to the test output; filter with `RUST_LOG`.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn random_image(rng: &mut StdRng, width: u32, height: u32) -> Image {
    Image::from_fn(width, height, |_, _| [rng.r#gen(), rng.r#gen(), rng.r#gen()]).unwrap()
}

/// A stack of `count` random layers with some hidden and some renamed.
fn random_stack(rng: &mut StdRng, count: usize) -> LayerStack {
    let mut stack = LayerStack::new();
    for i in 0..count {
        stack.add_image(random_image(rng, 5, 4)).unwrap();
        if rng.gen_bool(0.3) {
            stack.make_layer_invisible(i).unwrap();
        }
        if rng.gen_bool(0.3) {
            stack.rename_layer_at(i, "layer").unwrap();
        }
    }
    stack
}

#[test]
fn test_apply_operation_preserves_bookkeeping() {
    init_tracing();
    let mut rng = StdRng::seed_from_u64(11);
    for round in 0..20 {
        let mut stack = random_stack(&mut rng, 6);
        let target = round % 6;
        stack.set_current_layer(target).unwrap();

        let before = stack.clone();
        let kind = OperationKind::ALL[round % OperationKind::ALL.len()];
        stack.apply_operation_with_rng(kind, target, &mut rng).unwrap();

        assert_eq!(stack.layer_count(), before.layer_count());
        assert_eq!(stack.invisible_indices(), before.invisible_indices());
        assert_eq!(stack.names(), before.names());
        assert_eq!(stack.current_layer(), Some(target));
        for j in (0..6).filter(|&j| j != target) {
            assert_eq!(stack.image_at(j).unwrap(), before.image_at(j).unwrap());
        }
    }
}

#[test]
fn test_remove_shifts_everything_above() {
    init_tracing();
    let mut rng = StdRng::seed_from_u64(23);
    for removed in 0..6 {
        let mut stack = random_stack(&mut rng, 6);
        let before = stack.clone();
        stack.remove_at(removed).unwrap();

        assert_eq!(stack.layer_count(), 5);
        for j in 0..removed {
            assert_eq!(stack.image_at(j).unwrap(), before.image_at(j).unwrap());
            assert_eq!(stack.name_at(j), before.name_at(j));
            assert_eq!(stack.is_invisible(j).unwrap(), before.is_invisible(j).unwrap());
        }
        for j in removed + 1..6 {
            assert_eq!(stack.image_at(j - 1).unwrap(), before.image_at(j).unwrap());
            assert_eq!(stack.name_at(j - 1), before.name_at(j));
            assert_eq!(stack.is_invisible(j - 1).unwrap(), before.is_invisible(j).unwrap());
        }
        assert!(stack.invisible_indices().iter().all(|&i| i < 5));
        assert_eq!(stack.names().len(), 5);
    }
}

#[test]
fn test_names_always_unique() {
    let mut rng = StdRng::seed_from_u64(5);
    let mut stack = random_stack(&mut rng, 8);
    for i in 0..8 {
        let stored = stack.rename_layer_at(i, "layer").unwrap();
        assert!(stored.starts_with("layer"));
        let suffix = &stored["layer".len()..];
        assert_eq!(suffix.len() % "-copy".len(), 0);
        assert!(suffix.is_empty() || suffix.split_inclusive("-copy").all(|s| s == "-copy"));

        let names = stack.names();
        let unique: BTreeSet<_> = names.values().collect();
        assert_eq!(unique.len(), names.len());
    }
}

#[test]
fn test_apply_on_wrong_layer_leaves_stack_unchanged() {
    let mut rng = StdRng::seed_from_u64(99);
    let mut stack = random_stack(&mut rng, 4);
    let before = stack.clone();
    for index in 0..3 {
        for kind in OperationKind::ALL {
            let err = stack.apply_operation_with_rng(kind, index, &mut rng);
            assert_eq!(
                err,
                Err(StrataError::NotCurrentLayer {
                    index,
                    current: Some(3),
                })
            );
        }
    }
    assert_eq!(stack, before);
}

#[test]
fn test_custom_suffix() {
    let config = StackConfig::default().with_copy_suffix("'");
    let mut stack = LayerStack::with_config(config).unwrap();
    stack.add_blank_layer().unwrap();
    stack.add_blank_layer().unwrap();
    stack.add_blank_layer().unwrap();
    assert_eq!(stack.name_at(2), Some("new blank''"));
}

#[test]
fn test_pattern_then_blank_then_remove_all() {
    init_tracing();
    let mut stack = LayerStack::new();
    stack.add_from_pattern(&Checkerboard::new(6, 6, 2).unwrap()).unwrap();
    stack.add_blank_layer().unwrap();
    assert_eq!(stack.image_at(1).unwrap().dimensions(), (6, 6));

    stack.remove_at(1).unwrap();
    assert_eq!(stack.current_layer(), Some(0));
    stack.remove_at(0).unwrap();
    assert_eq!(stack.current_layer(), None);
    assert!(stack.names().is_empty());

    // A fresh size is accepted once the stack is empty again.
    stack.add_image(Image::filled(2, 2, [9, 9, 9]).unwrap()).unwrap();
    assert_eq!(stack.layer_count(), 1);
}

#[test]
fn test_shared_stack_serializes_edits() {
    let shared = SharedLayerStack::default();
    shared.with(|stack| stack.add_blank_layer()).unwrap();

    std::thread::scope(|scope| {
        for _ in 0..4 {
            let shared = shared.clone();
            scope.spawn(move || {
                shared.with(|stack| {
                    let current = stack.current_layer().unwrap();
                    stack.apply_operation(OperationKind::Greyscale, current)
                })
            });
        }
    });

    let stack = shared.snapshot();
    assert_eq!(stack.layer_count(), 1);
    assert_eq!(stack.name_at(0), Some("new blank"));
}
