use std::cell::{Cell, RefCell};
use std::rc::Rc;

use proptest::prelude::*;

use crate::{Finalize, Trace};

use crate::agent::Agent;
use crate::collectors::mark_sweep::{FinalizationRegistry, WeakMap, WeakRef, WeakSet};
use crate::error::{Error, TypeErrorKind};
use crate::symbol::{Symbol, WellKnownSymbol};
use crate::value::{Identity, Object, Value};

fn object(agent: &mut Agent) -> Value {
    Value::from(agent.create_object(Vec::new()).unwrap())
}

fn rooted_object(agent: &mut Agent) -> Value {
    let value = object(agent);
    agent.root(&value);
    value
}

fn is_allocated(agent: &Agent, value: &Value) -> bool {
    agent.is_allocated(value.as_identity().unwrap())
}

// a registry whose callback records every held value it is given
fn recording_registry(agent: &mut Agent) -> (FinalizationRegistry, Rc<RefCell<Vec<Value>>>) {
    let delivered = Rc::new(RefCell::new(Vec::new()));
    let sink = delivered.clone();
    let registry = FinalizationRegistry::new(agent, move |_, held| sink.borrow_mut().push(held))
        .unwrap();
    agent.root(&registry.into());
    (registry, delivered)
}

#[test]
fn weak_map_round_trip() {
    let agent = &mut Agent::new();
    let map = WeakMap::new(agent).unwrap();
    let key = object(agent);

    map.set(agent, &key, Value::from(1.0)).unwrap();
    assert_eq!(map.get(agent, &key), Ok(Some(Value::from(1.0))));
    assert_eq!(map.has(agent, &key), Ok(true));

    map.set(agent, &key, Value::from(2.0)).unwrap();
    assert_eq!(map.get(agent, &key), Ok(Some(Value::from(2.0))));
    assert_eq!(map.len(agent), Ok(1));

    assert_eq!(map.delete(agent, &key), Ok(true));
    assert_eq!(map.delete(agent, &key), Ok(false));
    assert_eq!(map.get(agent, &key), Ok(None));
}

#[test]
fn weak_map_rejects_keys_that_cannot_be_held_weakly() {
    let agent = &mut Agent::new();
    let map = WeakMap::new(agent).unwrap();
    let registered = Value::from(agent.symbol_for("shared"));

    for key in [
        registered.clone(),
        Value::from("not a key"),
        Value::from(1.0),
        Value::Null,
        Value::Undefined,
    ] {
        assert_eq!(
            map.set(agent, &key, Value::Null),
            Err(TypeErrorKind::InvalidWeakKey)
        );
        assert_eq!(map.get(agent, &key), Ok(None));
        assert_eq!(map.has(agent, &key), Ok(false));
        assert_eq!(map.delete(agent, &key), Ok(false));
    }

    let well_known = Value::from(Symbol::well_known(WellKnownSymbol::Iterator));
    let fresh = Value::from(agent.create_symbol(Some("local")));
    assert!(map.set(agent, &well_known, Value::Null).is_ok());
    assert!(map.set(agent, &fresh, Value::Null).is_ok());
}

#[test]
fn weak_set_add_is_idempotent() {
    let agent = &mut Agent::new();
    let set = WeakSet::new(agent).unwrap();
    let member = object(agent);

    set.add(agent, &member).unwrap().add(agent, &member).unwrap();
    assert_eq!(set.len(agent), Ok(1));
    assert_eq!(set.has(agent, &member), Ok(true));
    assert_eq!(set.delete(agent, &member), Ok(true));
    assert_eq!(set.has(agent, &member), Ok(false));
    assert_eq!(
        set.add(agent, &Value::from(true)),
        Err(TypeErrorKind::InvalidWeakKey)
    );
}

#[test]
fn weak_map_does_not_keep_its_keys_alive() {
    let agent = &mut Agent::new();
    let map = WeakMap::new(agent).unwrap();
    agent.root(&map.into());
    let kept = rooted_object(agent);
    let dropped = object(agent);

    map.set(agent, &kept, Value::from("kept")).unwrap();
    map.set(agent, &dropped, Value::from("dropped")).unwrap();

    let stats = agent.collect();
    assert_eq!(stats.entries_pruned, 1);
    assert_eq!(map.len(agent), Ok(1));
    assert_eq!(map.get(agent, &kept), Ok(Some(Value::from("kept"))));
    assert!(!is_allocated(agent, &dropped));
}

#[test]
fn weak_map_value_lives_exactly_as_long_as_its_key() {
    let agent = &mut Agent::new();
    let map = WeakMap::new(agent).unwrap();
    agent.root(&map.into());
    let key = rooted_object(agent);
    let value = object(agent);
    map.set(agent, &key, value.clone()).unwrap();

    agent.collect();
    assert!(is_allocated(agent, &value), "live map and key keep the value");

    agent.unroot(&key);
    agent.collect();
    assert!(!is_allocated(agent, &key));
    assert!(!is_allocated(agent, &value));
    assert_eq!(map.len(agent), Ok(0));
}

#[test]
fn a_strongly_held_value_outlives_its_dead_key() {
    let agent = &mut Agent::new();
    let map = WeakMap::new(agent).unwrap();
    agent.root(&map.into());
    let key = object(agent);
    let value = rooted_object(agent);
    map.set(agent, &key, value.clone()).unwrap();

    let stats = agent.collect();
    assert_eq!(stats.entries_pruned, 1);
    assert_eq!(map.len(agent), Ok(0));
    assert!(!is_allocated(agent, &key));
    assert!(is_allocated(agent, &value));

    // the entry is gone, so only the root holds the value now
    agent.unroot(&value);
    agent.collect();
    assert!(!is_allocated(agent, &value));
}

#[test]
fn a_live_key_does_not_keep_the_value_of_a_dead_map() {
    let agent = &mut Agent::new();
    let map = WeakMap::new(agent).unwrap();
    let key = rooted_object(agent);
    let value = object(agent);
    map.set(agent, &key, value.clone()).unwrap();

    agent.collect();
    assert!(!agent.is_allocated(Identity::Object(map.as_object())));
    assert!(!is_allocated(agent, &value));
    assert!(is_allocated(agent, &key));
}

#[test]
fn ephemeron_chains_resolve() {
    let agent = &mut Agent::new();
    let map = WeakMap::new(agent).unwrap();
    agent.root(&map.into());
    let first = rooted_object(agent);
    let second = object(agent);
    let third = object(agent);

    // second is only reachable as the value of first, third only as the value of second
    map.set(agent, &second, third.clone()).unwrap();
    map.set(agent, &first, second.clone()).unwrap();

    agent.collect();
    assert!(is_allocated(agent, &second));
    assert!(is_allocated(agent, &third));
    assert_eq!(map.len(agent), Ok(2));

    agent.unroot(&first);
    let stats = agent.collect();
    assert_eq!(stats.entries_pruned, 2);
    assert_eq!(stats.objects_swept, 3);
    assert_eq!(map.len(agent), Ok(0));
}

#[test]
fn symbols_are_collected_like_objects() {
    let agent = &mut Agent::new();
    let set = WeakSet::new(agent).unwrap();
    agent.root(&set.into());
    let fresh = Value::from(agent.create_symbol(Some("ephemeral")));
    let well_known = Value::from(Symbol::well_known(WellKnownSymbol::AsyncIterator));
    set.add(agent, &fresh).unwrap();
    set.add(agent, &well_known).unwrap();

    let stats = agent.collect();
    assert_eq!(stats.symbols_swept, 1);
    assert_eq!(set.has(agent, &fresh), Ok(false));
    assert_eq!(set.has(agent, &well_known), Ok(true), "well-known symbols never die");
}

#[test]
fn rooted_symbols_survive() {
    let agent = &mut Agent::new();
    let symbol = agent.create_symbol(Some("rooted"));
    agent.root(&symbol.into());
    agent.collect();
    assert!(agent.is_allocated(Identity::Symbol(symbol)));
    assert_eq!(agent.symbol_description(symbol).as_deref(), Some("rooted"));

    agent.unroot(&symbol.into());
    agent.collect();
    assert!(!agent.is_allocated(Identity::Symbol(symbol)));
}

#[test]
fn weak_ref_target_survives_the_job_that_created_it() {
    let agent = &mut Agent::new();
    let target = object(agent);
    let weak_ref = WeakRef::new(agent, &target).unwrap();
    agent.root(&weak_ref.into());

    agent.collect();
    assert_eq!(weak_ref.deref(agent), Ok(Some(target.clone())));

    // deref kept it alive again; the next boundary releases it
    agent.job_boundary();
    let stats = agent.collect();
    assert_eq!(stats.weak_refs_cleared, 1);
    assert_eq!(weak_ref.deref(agent), Ok(None));

    // once cleared it stays cleared
    agent.job_boundary();
    agent.collect();
    assert_eq!(weak_ref.deref(agent), Ok(None));
}

#[test]
fn weak_ref_deref_adds_to_kept_alive_set() {
    let agent = &mut Agent::new();
    let target = rooted_object(agent);
    let weak_ref = WeakRef::new(agent, &target).unwrap();
    agent.clear_kept_objects();
    assert!(agent.kept_alive().is_empty());

    weak_ref.deref(agent).unwrap();
    assert!(agent.kept_alive().contains(target.as_identity().unwrap()));
}

#[test]
fn weak_ref_rejects_invalid_targets() {
    let agent = &mut Agent::new();
    let registered = Value::from(agent.symbol_for("weak-ref-target"));
    for target in [registered, Value::from(0.0), Value::from("text")] {
        assert_eq!(
            WeakRef::new(agent, &target),
            Err(Error::Type(TypeErrorKind::InvalidWeakTarget))
        );
    }
    assert_eq!(agent.live_objects(), 0);
}

#[test]
fn finalization_is_delivered_from_the_job_queue_only() {
    let agent = &mut Agent::new();
    let (registry, delivered) = recording_registry(agent);
    let target = object(agent);
    registry
        .register(agent, &target, Value::from("held"), None)
        .unwrap();

    let stats = agent.collect();
    assert_eq!(stats.cells_emptied, 1);
    assert!(delivered.borrow().is_empty(), "collect never runs callbacks");
    assert_eq!(agent.pending_jobs(), 1);

    // a second collection does not schedule a second job
    agent.collect();
    assert_eq!(agent.pending_jobs(), 1);

    assert_eq!(agent.run_jobs(), 1);
    assert_eq!(*delivered.borrow(), [Value::from("held")]);
    assert_eq!(registry.cell_count(agent), Ok(0));

    agent.collect();
    assert_eq!(agent.run_jobs(), 0);
    assert_eq!(delivered.borrow().len(), 1, "delivered exactly once");
}

#[test]
fn cells_for_the_same_target_fire_independently() {
    let agent = &mut Agent::new();
    let (registry, delivered) = recording_registry(agent);
    let target = object(agent);
    registry.register(agent, &target, Value::from(1.0), None).unwrap();
    registry.register(agent, &target, Value::from(2.0), None).unwrap();

    agent.collect();
    agent.run_jobs();
    assert_eq!(*delivered.borrow(), [Value::from(1.0), Value::from(2.0)]);
}

#[test]
fn held_values_are_kept_alive_until_delivered() {
    let agent = &mut Agent::new();
    let (registry, delivered) = recording_registry(agent);
    let target = rooted_object(agent);
    let held = object(agent);
    registry.register(agent, &target, held.clone(), None).unwrap();

    agent.collect();
    assert!(is_allocated(agent, &held));

    agent.unroot(&target);
    agent.collect();
    assert!(is_allocated(agent, &held), "pending delivery keeps the held value");
    agent.run_jobs();
    assert_eq!(*delivered.borrow(), [held.clone()]);

    agent.collect();
    assert!(!is_allocated(agent, &held));
}

#[test]
fn register_checks_arguments_in_order() {
    let agent = &mut Agent::new();
    let (registry, _) = recording_registry(agent);
    let target = object(agent);

    assert_eq!(
        registry.register(agent, &Value::from("x"), Value::from("x"), Some(&Value::Null)),
        Err(TypeErrorKind::InvalidWeakTarget)
    );
    assert_eq!(
        registry.register(agent, &target, target.clone(), Some(&Value::Null)),
        Err(TypeErrorKind::SelfReferentialFinalization)
    );
    assert_eq!(
        registry.register(agent, &target, Value::Null, Some(&Value::Null)),
        Err(TypeErrorKind::InvalidUnregisterToken)
    );
    let registered = Value::from(agent.symbol_for("token"));
    assert_eq!(
        registry.register(agent, &target, Value::Null, Some(&registered)),
        Err(TypeErrorKind::InvalidUnregisterToken)
    );
    assert_eq!(registry.cell_count(agent), Ok(0));

    registry
        .register(agent, &target, Value::Null, Some(&Value::Undefined))
        .unwrap();
    assert_eq!(registry.cell_count(agent), Ok(1));
}

#[test]
fn unregister_removes_every_cell_with_the_token() {
    let agent = &mut Agent::new();
    let (registry, _) = recording_registry(agent);
    let token = rooted_object(agent);
    let first = rooted_object(agent);
    let second = rooted_object(agent);
    registry.register(agent, &first, Value::Null, Some(&token)).unwrap();
    registry.register(agent, &second, Value::Null, Some(&token)).unwrap();
    registry.register(agent, &second, Value::Null, None).unwrap();

    assert_eq!(registry.unregister(agent, &token), Ok(true));
    assert_eq!(registry.unregister(agent, &token), Ok(false));
    assert_eq!(registry.cell_count(agent), Ok(1));
    assert_eq!(
        registry.unregister(agent, &Value::from(1.0)),
        Err(TypeErrorKind::InvalidUnregisterToken)
    );
}

#[test]
fn unregister_after_death_cancels_delivery() {
    let agent = &mut Agent::new();
    let (registry, delivered) = recording_registry(agent);
    let token = rooted_object(agent);
    let target = object(agent);
    registry
        .register(agent, &target, Value::from("held"), Some(&token))
        .unwrap();

    agent.collect();
    assert_eq!(agent.pending_jobs(), 1);
    assert_eq!(registry.unregister(agent, &token), Ok(true));

    agent.run_jobs();
    assert!(delivered.borrow().is_empty());
}

#[test]
fn dead_tokens_are_cleared() {
    let agent = &mut Agent::new();
    let (registry, _) = recording_registry(agent);
    let target = rooted_object(agent);
    let token = object(agent);
    registry.register(agent, &target, Value::Null, Some(&token)).unwrap();

    let stats = agent.collect();
    assert_eq!(stats.tokens_cleared, 1);
    assert_eq!(stats.cells_emptied, 0);
    assert_eq!(registry.cell_count(agent), Ok(1));
}

#[test]
fn a_dead_registry_delivers_nothing() {
    let agent = &mut Agent::new();
    let delivered = Rc::new(Cell::new(0));
    let counter = delivered.clone();
    let registry =
        FinalizationRegistry::new(agent, move |_, _| counter.set(counter.get() + 1)).unwrap();
    let target = object(agent);
    registry.register(agent, &target, Value::Null, None).unwrap();

    agent.collect();
    assert!(!agent.is_allocated(Identity::Object(registry.as_object())));
    assert_eq!(agent.pending_jobs(), 0);
    agent.run_jobs();
    assert_eq!(delivered.get(), 0);
}

#[test]
fn cleanup_callbacks_may_use_the_agent() {
    let agent = &mut Agent::new();
    let map = WeakMap::new(agent).unwrap();
    agent.root(&map.into());
    let registry = FinalizationRegistry::new(agent, move |agent, held| {
        map.set(agent, &held, Value::from("finalized")).unwrap();
    })
    .unwrap();
    agent.root(&registry.into());
    let target = object(agent);
    let held = rooted_object(agent);
    registry.register(agent, &target, held.clone(), None).unwrap();

    agent.collect();
    agent.run_jobs();
    assert_eq!(map.get(agent, &held), Ok(Some(Value::from("finalized"))));
}

#[test]
fn host_jobs_end_with_a_job_boundary() {
    let agent = &mut Agent::new();
    let target = object(agent);
    let weak_ref = WeakRef::new(agent, &target).unwrap();
    agent.root(&weak_ref.into());

    let observed = Rc::new(Cell::new(false));
    let flag = observed.clone();
    agent.enqueue_job(move |agent| {
        flag.set(weak_ref.deref(agent).unwrap().is_some());
    });
    assert_eq!(agent.run_jobs(), 1);
    assert!(observed.get());
    assert!(agent.kept_alive().is_empty());

    agent.collect();
    assert_eq!(weak_ref.deref(agent), Ok(None));
}

#[test]
fn crossing_the_threshold_collects_at_the_next_boundary() {
    let agent = &mut Agent::new().with_heap_threshold(8);
    let weak_ref = {
        let target = object(agent);
        WeakRef::new(agent, &target).unwrap()
    };
    agent.root(&weak_ref.into());
    for _ in 0..16 {
        object(agent);
    }
    assert!(agent.job_boundary().is_some());
    assert_eq!(weak_ref.deref(agent), Ok(None));
    assert_eq!(agent.live_objects(), 1);
}

#[test]
fn allocation_fails_past_the_object_cap() {
    let agent = &mut Agent::new().with_max_heap_objects(2);
    object(agent);
    let map = WeakMap::new(agent).unwrap();
    assert!(matches!(WeakSet::new(agent), Err(Error::Alloc(_))));

    agent.collect();
    assert!(!agent.is_allocated(Identity::Object(map.as_object())));
    assert!(WeakSet::new(agent).is_ok());
}

#[test]
fn stale_handles_do_not_alias_reused_slots() {
    let agent = &mut Agent::new();
    let old = agent.create_object(vec![Value::from(1.0)]).unwrap();
    agent.collect();
    let new = agent.create_object(vec![Value::from(2.0)]).unwrap();

    assert_eq!(old.slot.index, new.slot.index);
    assert_ne!(old, new);
    assert_eq!(agent.fields(old), None);
    assert_eq!(agent.fields(new), Some(&[Value::from(2.0)][..]));

    let map = WeakMap::new(agent).unwrap();
    agent.root(&map.into());
    assert_eq!(map.get(agent, &old.into()), Ok(None));
}

#[test]
fn object_handles_belong_to_their_agent() {
    let a = &mut Agent::new();
    let b = &mut Agent::new();
    let a_object = a.create_object(vec![Value::from("a")]).unwrap();
    let b_object = b.create_object(vec![Value::from("b")]).unwrap();
    assert_eq!(a_object.slot, b_object.slot, "both heaps start at the same slot");
    assert_ne!(a_object, b_object);

    assert!(!b.is_allocated(Identity::Object(a_object)));
    assert_eq!(b.fields(a_object), None);
    assert_eq!(b.object_kind(a_object), None);

    let map = WeakMap::new(b).unwrap();
    b.root(&map.into());
    b.root(&b_object.into());
    map.set(b, &a_object.into(), Value::from("from a")).unwrap();
    assert_eq!(map.get(b, &b_object.into()), Ok(None));
    assert_eq!(map.get(b, &a_object.into()), Ok(Some(Value::from("from a"))));

    // rooting a foreign handle does nothing; the entry dies with the next collection
    b.root(&a_object.into());
    b.collect();
    assert_eq!(map.len(b), Ok(0));
    assert!(a.is_allocated(Identity::Object(a_object)));
    assert_eq!(a.fields(a_object), Some(&[Value::from("a")][..]));
}

#[test]
fn symbols_from_another_agent_are_not_kept_alive_here() {
    let a = &mut Agent::new();
    let b = &mut Agent::new();
    let symbol = Value::from(a.create_symbol(Some("owned by a")));
    a.root(&symbol);

    let set = WeakSet::new(b).unwrap();
    b.root(&set.into());
    set.add(b, &symbol).unwrap();
    b.collect();
    assert_eq!(set.has(b, &symbol), Ok(false));
    assert!(a.is_allocated(symbol.as_identity().unwrap()));
}

#[test]
fn ordinary_fields_are_strong_edges() {
    let agent = &mut Agent::new();
    let child = object(agent);
    let parent = agent.create_object(vec![child.clone()]).unwrap();
    agent.root(&parent.into());

    agent.collect();
    assert!(is_allocated(agent, &child));

    agent.fields_mut(parent).unwrap().clear();
    agent.collect();
    assert!(!is_allocated(agent, &child));
}

#[test]
fn receivers_are_checked() {
    let agent = &mut Agent::new();
    let map = WeakMap::new(agent).unwrap();
    let plain = object(agent);

    assert_eq!(
        WeakSet::from_value(agent, &map.into()),
        Err(TypeErrorKind::InvalidReceiver)
    );
    assert_eq!(
        WeakRef::from_value(agent, &plain),
        Err(TypeErrorKind::InvalidReceiver)
    );
    assert!(WeakMap::from_value(agent, &map.into()).is_ok());

    agent.collect();
    assert_eq!(
        WeakMap::from_value(agent, &map.into()),
        Err(TypeErrorKind::InvalidReceiver),
        "a collected map is no longer a valid receiver"
    );
}

thread_local! {
    static FINALIZED: Cell<usize> = const { Cell::new(0) };
}

#[derive(Trace)]
struct Node {
    next: Option<Object>,
    payload: Value,
    #[ignore_trace]
    visits: Rc<Cell<u32>>,
}

impl Finalize for Node {
    fn finalize(&self) {
        FINALIZED.with(|count| count.set(count.get() + 1));
    }
}

#[derive(Clone, Copy, Trace, Finalize)]
#[ephemera(empty_trace)]
struct Point {
    x: i32,
    y: i32,
}

#[test]
fn derived_trace_follows_host_fields() {
    let agent = &mut Agent::new();
    let visits = Rc::new(Cell::new(0));
    let payload = object(agent);
    let tail = agent
        .create_host_object(Node {
            next: None,
            payload: payload.clone(),
            visits: visits.clone(),
        })
        .unwrap();
    let head = agent
        .create_host_object(Node {
            next: Some(tail),
            payload: Value::Null,
            visits: visits.clone(),
        })
        .unwrap();
    agent.root(&head.into());

    agent.collect();
    assert!(agent.is_allocated(Identity::Object(tail)));
    assert!(is_allocated(agent, &payload));

    agent.host_data_mut::<Node>(head).unwrap().visits.set(3);
    assert_eq!(visits.get(), 3);
    assert!(agent.host_data::<Point>(head).is_none());

    FINALIZED.with(|count| count.set(0));
    agent.unroot(&head.into());
    agent.collect();
    assert_eq!(FINALIZED.with(Cell::get), 2);
    assert!(!is_allocated(agent, &payload));
}

#[test]
fn empty_trace_payloads_hold_nothing() {
    let agent = &mut Agent::new();
    let point = agent.create_host_object(Point { x: 1, y: 2 }).unwrap();
    agent.root(&point.into());
    agent.collect();

    let data = agent.host_data::<Point>(point).unwrap();
    assert_eq!((data.x, data.y), (1, 2));
    assert_eq!(agent.object_kind(point), Some(crate::ObjectKind::Host));
}

#[test]
fn host_objects_as_weak_keys() {
    let agent = &mut Agent::new();
    let map = WeakMap::new(agent).unwrap();
    agent.root(&map.into());
    let point = Value::from(agent.create_host_object(Point { x: 0, y: 0 }).unwrap());
    map.set(agent, &point, Value::from(true)).unwrap();

    agent.collect();
    assert_eq!(map.has(agent, &point), Ok(false));
}

proptest! {
    // entries whose keys stay rooted survive any number of collections,
    // everything else is pruned
    #[test]
    fn collection_prunes_exactly_the_dead_keys(rooted in prop::collection::vec(any::<bool>(), 1..32)) {
        let agent = &mut Agent::new();
        let map = WeakMap::new(agent).unwrap();
        agent.root(&map.into());

        let keys: Vec<Value> = rooted
            .iter()
            .map(|&keep| if keep { rooted_object(agent) } else { object(agent) })
            .collect();
        for (index, key) in keys.iter().enumerate() {
            map.set(agent, key, Value::from(index as f64)).unwrap();
        }

        let stats = agent.collect();
        let survivors = rooted.iter().filter(|&&keep| keep).count();
        prop_assert_eq!(map.len(agent), Ok(survivors));
        prop_assert_eq!(stats.entries_pruned, rooted.len() - survivors);
        for (index, (key, keep)) in keys.iter().zip(&rooted).enumerate() {
            let expected = keep.then(|| Value::from(index as f64));
            prop_assert_eq!(map.get(agent, key), Ok(expected));
        }
    }

    #[test]
    fn deref_never_revives(collections in 1usize..6) {
        let agent = &mut Agent::new();
        let target = object(agent);
        let weak_ref = WeakRef::new(agent, &target).unwrap();
        agent.root(&weak_ref.into());

        let mut seen_empty = false;
        for _ in 0..collections {
            agent.job_boundary();
            agent.collect();
            let current = weak_ref.deref(agent).unwrap();
            if seen_empty {
                prop_assert!(current.is_none());
            }
            seen_empty |= current.is_none();
        }
        prop_assert!(seen_empty);
    }
}
