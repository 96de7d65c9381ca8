pub mod hardware;

use defmt::{info, trace};
use embassy_executor::SpawnToken;
use embassy_time::{Duration, Ticker};
use mic_stream::{Producer, push_converted_block};
use static_cell::StaticCell;

use crate::RING_CAPACITY;
use hardware::{BLOCK_RATE_HZ, MicHardware, SAMPLE_BLOCK_SIZE, SAMPLE_RATE_HZ, SAMPLE_TIME};

// One stats line per second at 1 ms blocks.
const STATS_INTERVAL_BLOCKS: u32 = 1000;

pub struct MicTaskState {
    mic_hardware: MicHardware<'static>,
    producer: Producer<'static, RING_CAPACITY>,
}

impl MicTaskState {
    pub fn new(
        mic_hardware: MicHardware<'static>,
        producer: Producer<'static, RING_CAPACITY>,
    ) -> MicTaskState {
        MicTaskState {
            mic_hardware,
            producer,
        }
    }
}

pub static MIC_TASK_STATE: StaticCell<MicTaskState> = StaticCell::new();

pub fn create_mic_task(
    mic_hardware: MicHardware<'static>,
    producer: Producer<'static, RING_CAPACITY>,
) -> SpawnToken<impl Sized> {
    mic_task(MIC_TASK_STATE.init(MicTaskState::new(mic_hardware, producer)))
}

/// Samples the analog microphone one block at a time and feeds the queue.
///
/// Each iteration awaits a DMA-filled block of raw ADC codes, converts them
/// to PCM16 and pushes them. The DMA transfer itself completes well inside
/// one frame period; the ticker holds each block to the 1 ms cadence so the
/// stream leaves the producer at exactly the configured sample rate. Samples
/// that arrive while the queue is full are dropped; the queue keeps count,
/// and the count is reported once a second.
#[embassy_executor::task]
pub async fn mic_task(state: &'static mut MicTaskState) {
    info!(
        "Mic: sampling at {} Hz, {} samples per block",
        SAMPLE_RATE_HZ, SAMPLE_BLOCK_SIZE
    );

    let mut ticker = Ticker::every(Duration::from_hz(BLOCK_RATE_HZ));
    let mut block = [0u16; SAMPLE_BLOCK_SIZE];
    let mut block_count = 0u32;

    loop {
        ticker.next().await;

        state
            .mic_hardware
            .adc
            .read(
                state.mic_hardware.dma.reborrow(),
                [(&mut state.mic_hardware.channel, SAMPLE_TIME)].into_iter(),
                &mut block,
            )
            .await;

        let stored = push_converted_block(&mut state.producer, &block);
        trace!("Mic: stored {}/{} samples", stored, SAMPLE_BLOCK_SIZE);

        block_count += 1;
        if block_count % STATS_INTERVAL_BLOCKS == 0 {
            info!("Mic: {} blocks sampled, queue {}", block_count, state.producer.stats());
        }
    }
}
