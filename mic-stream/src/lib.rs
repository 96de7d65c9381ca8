#![cfg_attr(not(test), no_std)]

mod queue;

pub use queue::{Consumer, Producer, QueueStats, SampleQueue};

/// ADC code produced by a silent input (12-bit converter, mid-rail bias).
pub const ADC_ZERO_CODE: i16 = 2048;

/// Left shift expanding 12-bit ADC resolution to the full PCM16 range.
pub const PCM_GAIN_SHIFT: u32 = 4;

/// Protocol-reserved leading byte of every outgoing packet.
pub const PACKET_HEADER: u8 = 0x00;

/// Byte size of a packet carrying `samples` PCM16 samples plus the header.
pub const fn packet_size(samples: usize) -> usize {
    1 + 2 * samples
}

/// Converts one raw ADC sample to centered signed PCM16.
///
/// Pure function of the zero code and gain shift: the bias is subtracted and
/// the remaining 12 significant bits are shifted up to fill the i16 range.
pub const fn pcm_from_adc(raw: u16) -> i16 {
    (raw as i16 - ADC_ZERO_CODE) << PCM_GAIN_SHIFT
}

/// Converts a raw ADC block and pushes each sample into the queue.
///
/// Samples that do not fit are dropped, per the queue's overflow policy.
/// Returns how many were stored.
pub fn push_converted_block<const C: usize>(producer: &mut Producer<'_, C>, raw: &[u16]) -> usize {
    let mut stored = 0;

    for &code in raw {
        if producer.try_push(pcm_from_adc(code)) {
            stored += 1;
        }
    }

    stored
}

/// Fills one outgoing packet: header byte, then one little-endian PCM16
/// sample per slot, drained from the queue. Slots the queue cannot supply are
/// written as silence; underrun is degradation, not an error.
///
/// `packet` must be sized by [`packet_size`]. Returns how many slots carried
/// a real sample.
pub fn fill_packet<const C: usize>(consumer: &mut Consumer<'_, C>, packet: &mut [u8]) -> usize {
    debug_assert_eq!(packet.len() % 2, 1);

    packet[0] = PACKET_HEADER;

    let mut supplied = 0;

    for slot in packet[1..].chunks_exact_mut(2) {
        let sample = match consumer.try_pop() {
            Some(sample) => {
                supplied += 1;
                sample
            }
            None => 0,
        };

        slot.copy_from_slice(&sample.to_le_bytes());
    }

    supplied
}

#[cfg(test)]
mod test;
