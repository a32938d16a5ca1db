//! Binding, unbinding and dispatch order of event handlers.

mod common;

use std::cell::Cell;
use std::rc::Rc;

use common::{key_d, log};
use strata::events::{EventDispatcher, EventHandler, InputEvent, KeyCode, KeyEvent};

// === Bind and dispatch ===

#[test]
fn bound_handler_runs_once_with_the_event() {
    let dispatcher = EventDispatcher::<KeyEvent>::new();
    let seen = log();
    let sink = seen.clone();
    let handler = EventHandler::new(move |e: &mut KeyEvent| sink.borrow_mut().push(e.key()));

    assert!(dispatcher.bind(&handler));
    dispatcher.dispatch(&mut key_d());

    assert_eq!(*seen.borrow(), vec![KeyCode::KeyD]);
}

#[test]
fn binding_the_same_handler_twice_fails() {
    let dispatcher = EventDispatcher::<KeyEvent>::new();
    let calls = Rc::new(Cell::new(0));
    let counter = calls.clone();
    let handler = EventHandler::new(move |_: &mut KeyEvent| counter.set(counter.get() + 1));

    assert!(dispatcher.bind(&handler));
    assert!(!dispatcher.bind(&handler));
    assert!(!dispatcher.bind(&handler.clone()));
    assert_eq!(dispatcher.len(), 1);

    dispatcher.dispatch(&mut key_d());
    assert_eq!(calls.get(), 1);
}

#[test]
fn unbound_handler_is_not_called() {
    let dispatcher = EventDispatcher::<KeyEvent>::new();
    let called = Rc::new(Cell::new(false));
    let flag = called.clone();
    let handler = EventHandler::new(move |_: &mut KeyEvent| flag.set(true));
    let copy = handler.clone();

    assert!(dispatcher.bind(&handler));
    assert!(dispatcher.unbind(&copy));
    assert!(!dispatcher.unbind(&handler));

    dispatcher.dispatch(&mut key_d());
    assert!(!called.get());
}

#[test]
fn unbinding_a_never_bound_handler_fails() {
    let dispatcher = EventDispatcher::<KeyEvent>::new();
    let handler = EventHandler::new(|_: &mut KeyEvent| {});
    assert!(!dispatcher.unbind(&handler));
}

#[test]
fn handlers_run_in_bind_order() {
    let dispatcher = EventDispatcher::<KeyEvent>::new();
    let order = log();
    let handlers: Vec<EventHandler<KeyEvent>> = (0..5)
        .map(|i| {
            let sink = order.clone();
            EventHandler::new(move |_: &mut KeyEvent| sink.borrow_mut().push(i))
        })
        .collect();
    for handler in &handlers {
        assert!(dispatcher.bind(handler));
    }

    dispatcher.dispatch(&mut key_d());
    assert_eq!(*order.borrow(), vec![0, 1, 2, 3, 4]);
}

#[test]
fn unbinding_the_middle_handler_keeps_the_rest_in_order() {
    let dispatcher = EventDispatcher::<KeyEvent>::new();
    let order = log();
    let make = |name: &'static str| {
        let sink = order.clone();
        EventHandler::new(move |_: &mut KeyEvent| sink.borrow_mut().push(name))
    };
    let a = make("A");
    let b = make("B");
    let c = make("C");
    dispatcher.bind(&a);
    dispatcher.bind(&b);
    dispatcher.bind(&c);

    assert!(dispatcher.unbind(&b));
    dispatcher.dispatch(&mut key_d());
    assert_eq!(*order.borrow(), vec!["A", "C"]);
}

// === Handler identity ===

#[test]
fn moved_from_handler_cannot_unbind() {
    let dispatcher = EventDispatcher::<KeyEvent>::new();
    let called = Rc::new(Cell::new(false));
    let flag = called.clone();
    let mut original = EventHandler::new(move |_: &mut KeyEvent| flag.set(true));
    assert!(dispatcher.bind(&original));

    let moved = original.take();
    assert!(!original.is_valid());
    assert!(!dispatcher.unbind(&original));
    assert!(!dispatcher.bind(&original));

    dispatcher.dispatch(&mut key_d());
    assert!(called.get());
    assert!(dispatcher.unbind(&moved));
}

#[test]
fn clones_share_identity_distinct_handlers_do_not() {
    let a = EventHandler::new(|_: &mut KeyEvent| {});
    let b = EventHandler::new(|_: &mut KeyEvent| {});
    assert_eq!(a, a.clone());
    assert_ne!(a, b);
    assert_ne!(a.id(), b.id());
}

#[test]
fn default_handler_is_refused() {
    let dispatcher = EventDispatcher::<KeyEvent>::new();
    assert!(!dispatcher.bind(&EventHandler::default()));
    assert!(dispatcher.is_empty());
}

// === Mutation during dispatch ===

#[test]
fn handler_bound_during_dispatch_runs_from_the_next_dispatch() {
    let dispatcher = Rc::new(EventDispatcher::<KeyEvent>::new());
    let order = log();

    let late = {
        let sink = order.clone();
        EventHandler::new(move |_: &mut KeyEvent| sink.borrow_mut().push("late"))
    };
    let binder = {
        let sink = order.clone();
        let dispatcher = Rc::downgrade(&dispatcher);
        let late = late.clone();
        EventHandler::new(move |_: &mut KeyEvent| {
            sink.borrow_mut().push("binder");
            if let Some(dispatcher) = dispatcher.upgrade() {
                dispatcher.bind(&late);
            }
        })
    };
    dispatcher.bind(&binder);

    dispatcher.dispatch(&mut key_d());
    assert_eq!(*order.borrow(), vec!["binder"]);
    assert!(dispatcher.contains(&late));

    order.borrow_mut().clear();
    dispatcher.dispatch(&mut key_d());
    assert_eq!(*order.borrow(), vec!["binder", "late"]);
}

#[test]
fn handler_unbound_during_dispatch_still_runs_that_once() {
    let dispatcher = Rc::new(EventDispatcher::<KeyEvent>::new());
    let order = log();

    let victim = {
        let sink = order.clone();
        EventHandler::new(move |_: &mut KeyEvent| sink.borrow_mut().push("victim"))
    };
    let remover = {
        let sink = order.clone();
        let dispatcher = Rc::downgrade(&dispatcher);
        let victim = victim.clone();
        EventHandler::new(move |_: &mut KeyEvent| {
            sink.borrow_mut().push("remover");
            if let Some(dispatcher) = dispatcher.upgrade() {
                dispatcher.unbind(&victim);
            }
        })
    };
    dispatcher.bind(&remover);
    dispatcher.bind(&victim);

    dispatcher.dispatch(&mut key_d());
    assert_eq!(*order.borrow(), vec!["remover", "victim"]);

    order.borrow_mut().clear();
    dispatcher.dispatch(&mut key_d());
    assert_eq!(*order.borrow(), vec!["remover"]);
}

#[test]
fn handlers_see_each_others_handled_flag() {
    let dispatcher = EventDispatcher::<KeyEvent>::new();
    let seen = log();
    let first = EventHandler::new(|e: &mut KeyEvent| e.mark_handled());
    let second = {
        let sink = seen.clone();
        EventHandler::new(move |e: &mut KeyEvent| sink.borrow_mut().push(e.was_handled()))
    };
    dispatcher.bind(&first);
    dispatcher.bind(&second);

    let mut event = key_d();
    dispatcher.dispatch(&mut event);
    assert_eq!(*seen.borrow(), vec![true]);
}

#[test]
fn clones_share_captured_state() {
    let dispatcher = EventDispatcher::<KeyEvent>::new();
    let seen = log();
    let sink = seen.clone();
    let mut count = 0;
    let handler = EventHandler::new(move |_: &mut KeyEvent| {
        count += 1;
        sink.borrow_mut().push(count);
    });
    let copy = handler.clone();
    dispatcher.bind(&handler);

    dispatcher.dispatch(&mut key_d());
    copy.call(&mut key_d());
    dispatcher.dispatch(&mut key_d());

    assert_eq!(*seen.borrow(), vec![1, 2, 3]);
}

#[test]
fn nested_dispatch_skips_the_running_handler() {
    let dispatcher = Rc::new(EventDispatcher::<KeyEvent>::new());
    let order = log();

    let outer = {
        let sink = order.clone();
        let dispatcher = Rc::downgrade(&dispatcher);
        let depth = Rc::new(Cell::new(0));
        EventHandler::new(move |_: &mut KeyEvent| {
            sink.borrow_mut().push("outer");
            depth.set(depth.get() + 1);
            if depth.get() == 1 {
                if let Some(dispatcher) = dispatcher.upgrade() {
                    dispatcher.dispatch(&mut key_d());
                }
            }
        })
    };
    let inner = {
        let sink = order.clone();
        EventHandler::new(move |_: &mut KeyEvent| sink.borrow_mut().push("inner"))
    };
    dispatcher.bind(&outer);
    dispatcher.bind(&inner);

    dispatcher.dispatch(&mut key_d());
    assert_eq!(*order.borrow(), vec!["outer", "inner", "inner"]);
}
