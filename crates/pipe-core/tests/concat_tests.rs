//! Pruebas de `concat` / `concat_with` con pipes síncronos y async.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use pipe_core::{concat, concat_with, empty, map, map_async, LazyPipe, Pipe, PipeAsync, PipeKind};

fn plus_one() -> Pipe<i32, i32, i32> {
    empty().next(map(|v: i32| v + 1))
}

fn plus_one_async() -> PipeAsync<i32, i32, i32> {
    empty().next_async(map_async(|v: i32| async move { v + 1 }))
}

fn exploding() -> Pipe<i32, i32, i32> {
    empty().next(map(|_: i32| -> i32 { panic!("error") }))
}

fn exploding_async() -> PipeAsync<i32, i32, i32> {
    empty().next_async(map_async(|v: i32| async move {
                if v >= 0 {
                    panic!("error");
                }
                v
            }))
}

fn counting_async(calls: Arc<AtomicUsize>) -> PipeAsync<i32, i32, i32> {
    empty().next_async(map_async(move |v: i32| {
               calls.fetch_add(1, Ordering::SeqCst);
               async move { v + 1 }
           }))
}

fn sum() -> pipe_core::Step<(i32, i32), i32, i32> {
    map(|(a, b): (i32, i32)| a + b)
}

#[test]
fn concat_pipelines() {
    let pipe = plus_one();
    let subject = concat(pipe.clone(), pipe).next(sum());
    assert_eq!(subject.kind(), PipeKind::Sync);
    assert_eq!(subject.run((1, 2)).unwrap(), Ok(5));
}

#[test]
fn error_in_first_pipe_is_returned() {
    let subject = concat(exploding().catch(|_| 10), plus_one()).next(sum());
    assert_eq!(subject.run((1, 2)).unwrap(), Err(10));
}

#[test]
fn error_in_second_pipe_is_returned() {
    let subject = concat(plus_one(), exploding().catch(|_| 10)).next(sum());
    assert_eq!(subject.run((1, 2)).unwrap(), Err(10));
}

#[test]
fn concat_handler_catches_unhandled_sub_pipe_fault() {
    let subject = concat_with(plus_one(), exploding(), |_| 10).next(sum());
    assert_eq!(subject.run((1, 2)).unwrap(), Err(10));
}

#[test]
fn unhandled_sub_pipe_fault_escapes_with_original_payload() {
    let subject = concat(plus_one(), exploding()).next(sum());
    let unhandled = subject.run((1, 2)).unwrap_err();
    assert_eq!(unhandled.fault().message(), Some("error"));
}

#[test]
fn inputs_are_left_untouched() {
    let left = plus_one();
    let right = plus_one();
    let _joined = concat(left.clone(), right.clone());
    assert_eq!(left.len(), 1);
    assert_eq!(right.len(), 1);
    assert!(!left.has_fault_handler());
}

#[tokio::test]
async fn concat_async_pipelines() {
    let pipe = plus_one_async();
    let subject = concat(pipe.clone(), pipe).next(sum());
    assert_eq!(subject.kind(), PipeKind::Async);
    assert_eq!(subject.run((1, 2)).await.unwrap(), Ok(5));
}

#[tokio::test]
async fn concat_mixed_kinds_is_async() {
    let subject = concat(plus_one(), plus_one_async()).next(sum());
    assert_eq!(subject.kind(), PipeKind::Async);
    assert_eq!(subject.run((1, 2)).await.unwrap(), Ok(5));

    let reversed = concat(plus_one_async(), plus_one()).next(sum());
    assert_eq!(reversed.run((1, 2)).await.unwrap(), Ok(5));
}

#[tokio::test]
async fn async_error_in_first_pipe_is_returned() {
    let subject = concat(exploding_async().catch(|_| 10), plus_one_async()).next(sum());
    assert_eq!(subject.run((1, 2)).await.unwrap(), Err(10));
}

#[tokio::test]
async fn async_error_in_second_pipe_is_returned() {
    let subject = concat(plus_one_async(), exploding_async().catch(|_| 10)).next(sum());
    assert_eq!(subject.run((1, 2)).await.unwrap(), Err(10));
}

#[tokio::test]
async fn async_concat_handler_catches_unhandled_sub_pipe_fault() {
    let subject = concat_with(plus_one_async(), exploding_async(), |_| 10).next(sum());
    assert_eq!(subject.run((1, 2)).await.unwrap(), Err(10));
}

#[tokio::test]
async fn async_failure_in_first_pipe_skips_second() {
    let calls = Arc::new(AtomicUsize::new(0));
    let subject = concat(exploding_async().catch(|_| 7), counting_async(calls.clone())).next(sum());
    assert_eq!(subject.run((1, 2)).await.unwrap(), Err(7));
    assert_eq!(calls.load(Ordering::SeqCst), 0);

    let passing = concat(plus_one_async(), counting_async(calls.clone())).next(sum());
    assert_eq!(passing.run((1, 2)).await.unwrap(), Ok(5));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn mixed_failure_in_first_pipe_skips_second() {
    let calls = Arc::new(AtomicUsize::new(0));
    let subject = concat(exploding().catch(|_| 7), counting_async(calls.clone())).next(sum());
    assert_eq!(subject.kind(), PipeKind::Async);
    assert_eq!(subject.run((1, 2)).await.unwrap(), Err(7));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}
