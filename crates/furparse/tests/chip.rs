use furparse::chip::{ChipDescriptor, find, known_chips, lookup};

#[test]
fn test_lookup_known_ids() {
    assert_eq!(
        lookup(0x02),
        ChipDescriptor {
            name: "Genesis",
            channel_count: 10
        }
    );
    assert_eq!(
        lookup(0x83),
        ChipDescriptor {
            name: "YM2612",
            channel_count: 6
        }
    );
    assert_eq!(lookup(0xE0).name, "QSound");
    assert_eq!(lookup(0xE0).channel_count, 19);
    assert_eq!(lookup(0xAF).channel_count, 44);
}

#[test]
fn test_lookup_none_slot() {
    assert_eq!(lookup(0x00), ChipDescriptor::NONE);
    assert_eq!(lookup(0x00).channel_count, 0);
}

#[test]
fn test_lookup_absent_id_is_reserved() {
    let d = lookup(0xFC);
    assert_eq!(d, ChipDescriptor::RESERVED);
    assert_eq!(d.name, "reserved");
    assert_eq!(d.channel_count, 0);
    assert_eq!(find(0xFC), None);
}

#[test]
fn test_lookup_is_total() {
    for id in 0..=u8::MAX {
        let d = lookup(id);
        assert!(!d.name.is_empty());
        match find(id) {
            Some(found) => assert_eq!(found, d),
            None => assert_eq!(d, ChipDescriptor::RESERVED),
        }
    }
}

#[test]
fn test_authored_reserved_entries_are_defined() {
    // 0xBC is an authored placeholder with channels, unlike unknown ids.
    assert_eq!(find(0xBC).map(|d| d.channel_count), Some(8));
    assert_eq!(find(0xFE).map(|d| d.channel_count), Some(0));
    assert_eq!(find(0xFF).map(|d| d.name), Some("reserved for development"));
}

#[test]
fn test_known_chips_sorted_and_skip_none() {
    let ids: Vec<u8> = known_chips().map(|(id, _)| id).collect();
    assert!(!ids.contains(&0x00));
    assert!(ids.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(ids.first(), Some(&0x01));
    assert_eq!(ids.last(), Some(&0xFF));
    assert!(ids.contains(&0x83));
    assert!(!ids.contains(&0xFC));
}
