//! Pruebas del engine síncrono: orden, inmutabilidad, camino de error y
//! conversión de faults.

use pipe_core::{empty, empty_with, LazyPipe, PipeError, Step};

fn append(suffix: &'static str) -> Step<String, String, String> {
    Step::new(move |v: String| Ok(v + suffix))
}

fn failing(message: &'static str) -> Step<String, bool, String> {
    Step::new(move |_: String| -> Result<bool, String> { panic!("{message}") })
}

#[test]
fn run_steps_in_order() {
    let pipe = empty::<String, String>().next(append("a")).next(append("b"));
    assert_eq!(pipe.run(String::new()).unwrap(), Ok("ab".to_string()));
}

#[test]
fn respect_last_output() {
    let pipe = empty::<i32, String>().next(Step::new(|v: i32| Ok(v.to_string())))
                                     .next(Step::new(|v: String| Ok(v.len() > 1)));
    assert_eq!(pipe.run(7).unwrap(), Ok(false));
    assert_eq!(pipe.run(42).unwrap(), Ok(true));
}

#[test]
fn is_immutable() {
    let base = empty::<String, String>().next(append("a"));
    let with_b = base.next(append("b"));
    let with_c = base.next(append("c"));

    assert_eq!(base.len(), 1);
    assert_eq!(base.run(String::new()).unwrap(), Ok("a".to_string()));
    assert_eq!(with_b.run(String::new()).unwrap(), Ok("ab".to_string()));
    assert_eq!(with_c.run(String::new()).unwrap(), Ok("ac".to_string()));
}

#[test]
fn follow_error_path() {
    // el fault se convierte en error y el siguiente step con on_error lo recupera
    let recover = Step::new(|v: bool| Ok(v)).with_error(|_: String| Ok(true));
    let pipe = empty::<String, String>().next(failing("boom"))
                                        .next(recover)
                                        .catch(|_| "my error".to_string());
    assert_eq!(pipe.run("x".into()).unwrap(), Ok(true));
}

#[test]
fn error_passes_through_steps_without_error_handler() {
    let counted = Step::new(|v: String| Ok(v + "!"));
    let pipe = empty::<String, String>().next(Step::new(|_: String| Err::<String, String>("typed".into())))
                                        .next(counted)
                                        .next(append("never"));
    assert_eq!(pipe.run("x".into()).unwrap(), Err("typed".to_string()));
}

#[test]
fn catch_error() {
    let pipe = empty::<String, String>().next(failing("boom")).catch(|_| "my error".to_string());
    assert_eq!(pipe.run("x".into()).unwrap(), Err("my error".to_string()));
}

#[test]
fn fault_handler_sees_panic_message() {
    let pipe = empty::<String, String>().next(failing("is invalid"))
                                        .catch(|fault| format!("an error: {}", fault.message().unwrap_or("?")));
    assert_eq!(pipe.run("x".into()).unwrap(), Err("an error: is invalid".to_string()));
}

#[test]
fn throw_unhandled() {
    let pipe = empty::<String, String>().next(failing("my error"));
    let unhandled = pipe.run("x".into()).unwrap_err();
    assert_eq!(unhandled.fault().message(), Some("my error"));
}

#[test]
fn use_default_error() {
    let pipe = empty_with::<String, String, _>(|_| "my error".to_string()).next(failing("boom"));
    assert_eq!(pipe.run("x".into()).unwrap(), Err("my error".to_string()));
}

#[test]
fn catch_overrides_default_error() {
    let pipe = empty_with::<String, String, _>(|_| "my error".to_string()).next(failing("boom"))
                                                                         .catch(|_| "my error 2".to_string());
    assert_eq!(pipe.run("x".into()).unwrap(), Err("my error 2".to_string()));
}

#[test]
fn maybe_some_and_none() {
    let pipe = empty::<String, String>().next(append("a"));
    assert_eq!(pipe.maybe("x".into()), Some("xa".to_string()));

    let failing_pipe = empty::<String, String>().next(failing("boom"));
    assert_eq!(failing_pipe.maybe("x".into()), None);

    let typed = empty::<String, String>().next(Step::new(|_: String| Err::<String, String>("no".into())));
    assert_eq!(typed.maybe("x".into()), None);
}

#[test]
fn panicking_fault_handler_is_unhandled() {
    let pipe = empty::<String, String>().next(failing("step")).catch(|_| -> String { panic!("handler") });
    let unhandled = pipe.run("x".into()).unwrap_err();
    assert_eq!(unhandled.fault().message(), Some("handler"));
    assert_eq!(pipe.maybe("x".into()), None);
    assert!(pipe.force("x".into()).unwrap_err().is_unhandled());
}

#[test]
fn force_value_or_error() {
    let pipe = empty::<String, String>().next(append("a"));
    assert_eq!(pipe.force("x".into()).unwrap(), "xa");

    let typed = empty::<String, String>().next(Step::new(|_: String| Err::<String, String>("no".into())));
    assert_eq!(typed.force("x".into()).unwrap_err().failure(), Some("no".to_string()));

    let unhandled = empty::<String, String>().next(failing("boom")).force("x".into()).unwrap_err();
    assert!(unhandled.is_unhandled());
    assert!(matches!(unhandled, PipeError::Unhandled(_)));
}

#[test]
fn pipe_runs_concurrently_from_threads() {
    let pipe = empty::<u64, ()>().next(Step::new(|v: u64| Ok(v * 2)));
    let handles: Vec<_> = (0..4u64).map(|i| {
                                       let pipe = pipe.clone();
                                       std::thread::spawn(move || pipe.run(i).unwrap())
                                   })
                                   .collect();
    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(results, vec![Ok(0), Ok(2), Ok(4), Ok(6)]);
}
