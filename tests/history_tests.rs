//! Navigation properties of the history buffer, driven through the public
//! API only.

use xo_show::history::HistoryBuffer;
use xo_show::item::ItemDescriptor;

fn buffer(names: &[&str]) -> HistoryBuffer {
    let items = names
        .iter()
        .map(|n| ItemDescriptor::new(format!("/photos/{n}.jpg")))
        .collect();
    HistoryBuffer::from_items(items, 120).unwrap()
}

fn title(item: &ItemDescriptor) -> &str {
    item.title.as_deref().unwrap()
}

#[test]
fn capacity_three_walkthrough() {
    // Items A, B, C loaded in order, cursor starts at A.
    let mut buf = buffer(&["A", "B", "C"]);
    assert_eq!(title(buf.current()), "A");
    assert_eq!(title(buf.next()), "B");
    assert_eq!(title(buf.next()), "C");
    // Documented policy: the wrap target is absolute slot 0.
    assert_eq!(title(buf.next()), "A");
}

#[test]
fn full_cycle_returns_to_the_starting_item() {
    let mut buf = buffer(&["A", "B", "C", "D", "E"]);
    let start = buf.current().clone();
    let mut visited = vec![start.clone()];
    for _ in 0..buf.capacity() - 1 {
        visited.push(buf.next().clone());
    }
    // Each populated slot visited at most once before repeating.
    for i in 0..visited.len() {
        for j in i + 1..visited.len() {
            assert_ne!(visited[i], visited[j]);
        }
    }
    assert_eq!(*buf.next(), start);
}

#[test]
fn prev_inverts_next_between_tail_and_head() {
    let mut buf = buffer(&["A", "B", "C", "D"]);
    for _ in 0..2 {
        let here = buf.current().clone();
        buf.next();
        assert_eq!(*buf.prev(), here);
        buf.next();
    }
}

#[test]
fn prev_at_tail_is_idempotent() {
    let mut buf = buffer(&["A", "B", "C"]);
    let oldest = buf.current().clone();
    for _ in 0..5 {
        assert_eq!(*buf.prev(), oldest);
    }
    assert_eq!(buf.cursor(), buf.tail());
}

#[test]
fn n_forward_n_back_round_trip() {
    let mut buf = buffer(&["A", "B", "C", "D", "E", "F"]);
    let start = buf.current().clone();
    for n in 1..=4 {
        for _ in 0..n {
            buf.next();
        }
        for _ in 0..n {
            buf.prev();
        }
        assert_eq!(*buf.current(), start);
    }
}

#[test]
fn append_evicts_oldest_on_collision() {
    let mut buf = buffer(&["A", "B", "C"]);
    assert_eq!(buf.head(), 2);
    assert_eq!(buf.tail(), 0);

    buf.append(ItemDescriptor::new("/photos/X.jpg"));
    // Head wrapped onto tail, so the oldest item was evicted.
    assert_eq!(buf.head(), 0);
    assert_eq!(buf.tail(), 1);

    // The tail move also changes where prev() saturates.
    buf.next(); // cursor 1 == tail
    let at_tail = buf.current().clone();
    assert_eq!(*buf.prev(), at_tail);
}

#[test]
fn retention_limit_caps_capacity() {
    let items: Vec<ItemDescriptor> = (0..10)
        .map(|i| ItemDescriptor::new(format!("/photos/{i:02}.jpg")))
        .collect();
    let buf = HistoryBuffer::from_items(items, 4).unwrap();
    assert_eq!(buf.capacity(), 4);
    assert_eq!(title(buf.current()), "00");
}
