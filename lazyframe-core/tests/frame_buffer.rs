use lazyframe_core::{FrameBuffer, FrameBufferConfig, LazyFrameError};
use proptest::prelude::*;

fn frame(v: u8) -> Vec<u8> {
    vec![v; 3]
}

fn store(buffer: &mut FrameBuffer<u8>, v: u8, is_done: bool) -> u64 {
    let idx = buffer.store_frame(&frame(v)).unwrap();
    buffer.store_effect(idx, v as usize, v as f32, is_done).unwrap();
    idx
}

#[test]
fn test_episode_boundary_scenario() {
    let mut buffer = FrameBuffer::<u8>::new(5, 2).unwrap();
    for (i, &d) in [false, false, true, false, false].iter().enumerate() {
        assert_eq!(store(&mut buffer, i as u8, d), i as u64);
    }

    let obs = buffer.encode_observation(2, 2).unwrap();
    assert_eq!(obs.frame(0), Some(&frame(1)[..]));
    assert_eq!(obs.frame(1), Some(&frame(2)[..]));

    let obs = buffer.encode_observation(3, 2).unwrap();
    assert_eq!(obs.frame(0), None);
    assert_eq!(obs.frame(1), Some(&frame(3)[..]));
    assert_eq!(obs.to_vec(), vec![0, 0, 0, 3, 3, 3]);

    let obs = buffer.encode_observation(4, 2).unwrap();
    assert_eq!(obs.to_vec(), [frame(3), frame(4)].concat());

    store(&mut buffer, 5, false);
    assert_eq!(
        buffer.get_frame(0).err(),
        Some(LazyFrameError::StaleIndex {
            idx: 0,
            num_stored: 6,
            capacity: 5
        })
    );
    assert_eq!(buffer.get_frame(5).unwrap(), &frame(5)[..]);
}

#[test]
fn test_stale_store_effect() {
    let mut buffer = FrameBuffer::<u8>::new(2, 1).unwrap();
    for i in 0..3 {
        store(&mut buffer, i, false);
    }
    assert!(matches!(
        buffer.store_effect(0, 0, 0., false),
        Err(LazyFrameError::StaleIndex { .. })
    ));
    assert!(matches!(
        buffer.store_effect(3, 0, 0., false),
        Err(LazyFrameError::StaleIndex { .. })
    ));
}

#[test]
fn test_replay_buffer_base_error_downcast() {
    use lazyframe_core::ReplayBufferBase;

    let config = FrameBufferConfig::default().capacity(0);
    let err = FrameBuffer::<u8>::build(&config).err().unwrap();
    assert!(matches!(
        err.downcast_ref::<LazyFrameError>(),
        Some(LazyFrameError::BadCapacity { .. })
    ));
}

proptest! {
    #[test]
    fn prop_round_trip(capacity in 1usize..16, values in prop::collection::vec(any::<u8>(), 1..16)) {
        prop_assume!(values.len() <= capacity);
        let mut buffer = FrameBuffer::<u8>::new(capacity, 4).unwrap();
        let ixs = values.iter().map(|&v| store(&mut buffer, v, false)).collect::<Vec<_>>();
        for (&idx, &v) in ixs.iter().zip(values.iter()) {
            prop_assert_eq!(buffer.get_frame(idx).unwrap(), &frame(v)[..]);
        }
    }

    #[test]
    fn prop_fifo_eviction(capacity in 1usize..8, n in 1usize..32) {
        let mut buffer = FrameBuffer::<u8>::new(capacity, 2).unwrap();
        for i in 0..n {
            store(&mut buffer, i as u8, false);
        }
        prop_assert_eq!(buffer.len(), n.min(capacity));
        for idx in 0..n as u64 {
            let is_live = idx + capacity as u64 >= n as u64;
            prop_assert_eq!(buffer.get_frame(idx).is_ok(), is_live);
            if !is_live {
                prop_assert!(buffer.store_effect(idx, 0, 0., false).is_err());
            }
        }
    }

    #[test]
    fn prop_histories(
        capacity in 1usize..10,
        history_len in 1usize..6,
        dones in prop::collection::vec(prop::bool::weighted(0.3), 1..30),
    ) {
        let mut buffer = FrameBuffer::<u8>::new(capacity, history_len).unwrap();
        for (i, &d) in dones.iter().enumerate() {
            store(&mut buffer, i as u8, d);
        }

        let n = dones.len() as u64;
        let oldest = n - buffer.len() as u64;
        for idx in oldest..n {
            let obs = buffer.encode_observation(idx, history_len).unwrap();

            // Stack shape invariance and idempotence
            prop_assert_eq!(obs.len(), history_len);
            prop_assert_eq!(&obs, &buffer.encode_observation(idx, history_len).unwrap());
            prop_assert_eq!(obs.latest(), Some(&frame(idx as u8)[..]));

            // Padding only at the front, frames consecutive up to `idx`
            let n_frames = history_len - obs.padding();
            for k in 0..history_len {
                prop_assert_eq!(obs.frame(k).is_some(), k >= obs.padding());
            }
            let first = idx + 1 - n_frames as u64;
            prop_assert!(first >= oldest);
            for (j, i) in (first..=idx).enumerate() {
                prop_assert_eq!(obs.frame(obs.padding() + j), Some(&frame(i as u8)[..]));
            }

            // No episode boundary inside the history
            for i in first..idx {
                prop_assert!(!dones[i as usize]);
            }

            // The history stops only at a boundary or at the oldest frame
            if obs.padding() > 0 {
                prop_assert!(first == oldest || dones[first as usize - 1]);
            }
        }
    }

    #[test]
    fn prop_sample_validity(
        capacity in 2usize..10,
        dones in prop::collection::vec(prop::bool::weighted(0.3), 2..30),
        batch_size in 1usize..4,
        seed in any::<u64>(),
    ) {
        let config = FrameBufferConfig::default().capacity(capacity).history_len(3).seed(seed);
        let mut buffer = FrameBuffer::<u8>::with_config(&config).unwrap();
        for (i, &d) in dones.iter().enumerate() {
            store(&mut buffer, i as u8, d);
        }
        prop_assume!(buffer.can_sample(batch_size));

        let n = buffer.num_stored();
        let write_cursor = buffer.write_cursor();
        let oldest = n - buffer.len() as u64;
        let batch = buffer.sample(batch_size).unwrap();
        prop_assert_eq!(batch.len(), batch_size);

        for k in 0..batch_size {
            let ix = batch.ix_sample[k];
            prop_assert!(ix >= oldest && ix + 1 < n);
            prop_assert_ne!(((ix + 1) % capacity as u64) as usize, write_cursor);
            prop_assert_eq!(batch.is_done[k], dones[ix as usize]);
            prop_assert_eq!(batch.next_obs[k].latest(), Some(&frame(ix as u8 + 1)[..]));
            if batch.is_done[k] {
                // The next observation starts a new episode.
                prop_assert_eq!(batch.next_obs[k].padding(), 2);
            }
        }
    }
}
