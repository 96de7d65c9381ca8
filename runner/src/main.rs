#![no_std]
#![no_main]

mod audio_task;
mod hardware;
mod mic_task;
mod usb;

use defmt::info;
use embassy_executor::Spawner;
use mic_stream::SampleQueue;

use defmt_rtt as _;
use panic_probe as _;

use crate::mic_task::hardware::SAMPLE_BLOCK_SIZE;

// Four sample blocks of headroom between the sampling and streaming contexts.
pub const RING_CAPACITY: usize = 4 * SAMPLE_BLOCK_SIZE;

static SAMPLE_QUEUE: SampleQueue<RING_CAPACITY> = SampleQueue::new();

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let hardware = hardware::Hardware::get();

    let mut config = embassy_usb::Config::new(0xc0de, 0xcafe);
    config.manufacturer = Some("mic-stream");
    config.product = Some("USB analog microphone");
    config.serial_number = Some("12345678");

    let mut builder = embassy_usb::Builder::new(
        hardware.usb.driver,
        config,
        hardware.usb.config_descriptor,
        hardware.usb.bos_descriptor,
        &mut [], // no msos descriptors
        hardware.usb.control_buf,
    );

    let audio_hardware = crate::get_audio_usb_hardware!(&mut builder);

    let usb_device = builder.build();

    let (producer, consumer) = SAMPLE_QUEUE.split();

    let (control_task, streaming_task) = audio_task::create_audio_tasks(audio_hardware, consumer);

    spawner.spawn(usb::usb_task(usb_device)).unwrap();
    spawner.spawn(control_task).unwrap();
    spawner.spawn(streaming_task).unwrap();
    spawner
        .spawn(mic_task::create_mic_task(hardware.mic, producer))
        .unwrap();

    info!("USB microphone ready");
}
