use pretty_assertions::assert_eq;

use crate::{
    PACKET_HEADER, SampleQueue, fill_packet, packet_size, pcm_from_adc, push_converted_block,
};

#[test]
#[should_panic]
fn splitting_twice_panics() {
    let queue = SampleQueue::<32>::new();
    let _endpoints = queue.split();
    let _endpoints = queue.split();
}

#[test]
fn capacity_is_one_less_than_storage() {
    assert_eq!(SampleQueue::<32>::capacity(), 31);
}

#[test]
fn starts_empty_and_pop_on_empty_changes_nothing() {
    let queue = SampleQueue::<32>::new();
    let (mut producer, mut consumer) = queue.split();

    assert!(queue.is_empty());
    assert_eq!(consumer.try_pop(), None);
    assert_eq!(consumer.try_pop(), None);
    assert_eq!(queue.len(), 0);

    // Cursors were not disturbed: a push still lands in FIFO position.
    assert!(producer.try_push(7));
    assert_eq!(queue.len(), 1);
    assert_eq!(consumer.try_pop(), Some(7));
}

#[test]
fn reports_full_only_at_capacity() {
    let queue = SampleQueue::<32>::new();
    let (mut producer, _consumer) = queue.split();

    for i in 0..31 {
        assert!(!queue.is_full(), "full reported at occupancy {i}");
        assert!(producer.try_push(i as i16));
        assert_eq!(queue.len(), i + 1);
    }

    assert!(queue.is_full());
}

#[test]
fn push_into_full_queue_is_rejected_and_state_preserved() {
    let queue = SampleQueue::<32>::new();
    let (mut producer, mut consumer) = queue.split();

    for i in 0..31 {
        assert!(producer.try_push(i));
    }

    assert!(!producer.try_push(999));
    assert_eq!(queue.len(), 31);

    let drained: Vec<i16> = core::iter::from_fn(|| consumer.try_pop()).collect();
    assert_eq!(drained, (0..31).collect::<Vec<i16>>());
}

#[test]
fn preserves_push_order() {
    let queue = SampleQueue::<32>::new();
    let (mut producer, mut consumer) = queue.split();

    let tagged: Vec<i16> = (100..125).collect();

    for &sample in &tagged {
        assert!(producer.try_push(sample));
    }

    let drained: Vec<i16> = core::iter::from_fn(|| consumer.try_pop()).collect();
    assert_eq!(drained, tagged);
}

#[test]
fn interleaved_push_pop_keeps_order() {
    let queue = SampleQueue::<32>::new();
    let (mut producer, mut consumer) = queue.split();

    for sample in 1..=4 {
        assert!(producer.try_push(sample));
    }

    assert_eq!(consumer.try_pop(), Some(1));
    assert_eq!(consumer.try_pop(), Some(2));

    for sample in 5..=8 {
        assert!(producer.try_push(sample));
    }

    assert_eq!(queue.len(), 6);

    let drained: Vec<i16> = core::iter::from_fn(|| consumer.try_pop()).collect();
    assert_eq!(drained, vec![3, 4, 5, 6, 7, 8]);
}

#[test]
fn cursors_wrap_around_storage() {
    let queue = SampleQueue::<32>::new();
    let (mut producer, mut consumer) = queue.split();

    // Many more samples than the storage holds, drained in lockstep.
    for round in 0..10i16 {
        for i in 0..24 {
            assert!(producer.try_push(round * 24 + i));
        }
        for i in 0..24 {
            assert_eq!(consumer.try_pop(), Some(round * 24 + i));
        }
        assert!(queue.is_empty());
    }

    assert_eq!(queue.dropped_samples(), 0);
}

#[test]
fn counts_dropped_samples() {
    let queue = SampleQueue::<32>::new();
    let (mut producer, _consumer) = queue.split();

    for i in 0..31 {
        assert!(producer.try_push(i));
    }
    for _ in 0..3 {
        assert!(!producer.try_push(-1));
    }

    assert_eq!(queue.dropped_samples(), 3);
    assert_eq!(producer.stats().occupancy, 31);
    assert_eq!(producer.stats().dropped, 3);
}

#[test]
fn conversion_is_centered_and_scaled() {
    assert_eq!(pcm_from_adc(2048), 0);
    assert_eq!(pcm_from_adc(0), -32768);
    assert_eq!(pcm_from_adc(4095), 32752);
    assert_eq!(pcm_from_adc(2049), 16);
    assert_eq!(pcm_from_adc(2047), -16);

    // Pure function: repeated conversion of the same code is identical.
    assert_eq!(pcm_from_adc(1234), pcm_from_adc(1234));
}

#[test]
fn converted_block_lands_in_queue() {
    let queue = SampleQueue::<32>::new();
    let (mut producer, mut consumer) = queue.split();

    let raw = [2048u16, 2049, 2047, 0, 4095, 3072, 1024, 2048];
    assert_eq!(push_converted_block(&mut producer, &raw), 8);

    let drained: Vec<i16> = core::iter::from_fn(|| consumer.try_pop()).collect();
    let expected: Vec<i16> = raw.iter().map(|&code| pcm_from_adc(code)).collect();
    assert_eq!(drained, expected);
}

#[test]
fn converted_block_drops_overflow() {
    let queue = SampleQueue::<32>::new();
    let (mut producer, _consumer) = queue.split();

    let raw = [2048u16; 24];
    assert_eq!(push_converted_block(&mut producer, &raw), 24);
    // Only 7 slots left out of 31.
    assert_eq!(push_converted_block(&mut producer, &raw), 7);
    assert_eq!(queue.len(), 31);
    assert_eq!(queue.dropped_samples(), 17);
}

#[test]
fn packet_carries_header_then_samples_in_order() {
    let queue = SampleQueue::<32>::new();
    let (mut producer, mut consumer) = queue.split();

    let raw = [2048u16, 2049, 2047, 0, 4095, 3072, 1024, 2500];
    push_converted_block(&mut producer, &raw);

    let mut packet = [0xffu8; packet_size(8)];
    assert_eq!(fill_packet(&mut consumer, &mut packet), 8);

    assert_eq!(packet[0], PACKET_HEADER);
    for (slot, &code) in packet[1..].chunks_exact(2).zip(&raw) {
        assert_eq!(slot, pcm_from_adc(code).to_le_bytes());
    }
}

#[test]
fn underrun_pads_packet_with_silence() {
    let queue = SampleQueue::<32>::new();
    let (_producer, mut consumer) = queue.split();

    let mut packet = [0xffu8; packet_size(8)];
    assert_eq!(fill_packet(&mut consumer, &mut packet), 0);

    assert_eq!(packet, [0u8; 17]);
}

#[test]
fn partial_underrun_pads_only_the_tail() {
    let queue = SampleQueue::<32>::new();
    let (mut producer, mut consumer) = queue.split();

    assert!(producer.try_push(100));
    assert!(producer.try_push(-200));
    assert!(producer.try_push(300));

    let mut packet = [0xffu8; packet_size(8)];
    assert_eq!(fill_packet(&mut consumer, &mut packet), 3);

    assert_eq!(packet[0], PACKET_HEADER);
    assert_eq!(packet[1..3], 100i16.to_le_bytes());
    assert_eq!(packet[3..5], (-200i16).to_le_bytes());
    assert_eq!(packet[5..7], 300i16.to_le_bytes());
    assert_eq!(packet[7..], [0u8; 10]);

    // Nothing is carried over: the next packet is all silence.
    let mut next = [0xffu8; packet_size(8)];
    assert_eq!(fill_packet(&mut consumer, &mut next), 0);
    assert_eq!(next, [0u8; 17]);
}

#[test]
fn packet_size_includes_header() {
    assert_eq!(packet_size(8), 17);
    assert_eq!(packet_size(48), 97);
}
