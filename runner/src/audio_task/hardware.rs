use embassy_stm32::peripherals;
use embassy_stm32::usb;
use embassy_usb::class::uac1;
use embassy_usb::class::uac1::microphone;
use static_cell::StaticCell;

pub struct AudioUsbHardware<'d> {
    pub stream: microphone::Stream<'d, usb::Driver<'d, peripherals::USB_OTG_HS>>,
    pub control_monitor: microphone::ControlMonitor<'d>,
}

// Mono analog microphone input
pub const INPUT_CHANNEL_COUNT: usize = 1;

// Fixed sample rate of 48 kHz
pub const SAMPLE_RATE_HZ: u32 = 48_000;

// Use 16 bit samples for microphone input
pub const SAMPLE_WIDTH: uac1::SampleWidth = uac1::SampleWidth::Width2Byte;
pub const SAMPLE_SIZE: usize = SAMPLE_WIDTH as usize;
pub const SAMPLE_SIZE_PER_S: usize = (SAMPLE_RATE_HZ as usize) * INPUT_CHANNEL_COUNT * SAMPLE_SIZE;

// PCM16 samples per 1 ms - for the full-speed USB frame period of 1 ms
pub const USB_FRAME_SAMPLES: usize = SAMPLE_SIZE_PER_S.div_ceil(1000) / SAMPLE_SIZE;

// Select mono audio channel (left front)
pub const AUDIO_CHANNELS: [uac1::Channel; INPUT_CHANNEL_COUNT] = [uac1::Channel::LeftFront];

// Each isochronous packet carries the protocol-reserved header byte followed
// by one USB frame worth of samples
pub const USB_MAX_PACKET_SIZE: usize = mic_stream::packet_size(USB_FRAME_SAMPLES);

pub static STATE: StaticCell<microphone::State> = StaticCell::new();

#[macro_export]
macro_rules! get_audio_usb_hardware {
    ($builder:expr) => {{
        let state = $crate::audio_task::hardware::STATE
            .init(embassy_usb::class::uac1::microphone::State::new());

        // Create the UAC1 Microphone class components (synchronous mode)
        let (stream, control_monitor) = embassy_usb::class::uac1::microphone::Microphone::new(
            $builder,
            state,
            $crate::audio_task::hardware::USB_MAX_PACKET_SIZE as u16,
            $crate::audio_task::hardware::SAMPLE_WIDTH,
            &[$crate::audio_task::hardware::SAMPLE_RATE_HZ],
            &$crate::audio_task::hardware::AUDIO_CHANNELS,
        );

        $crate::audio_task::hardware::AudioUsbHardware {
            stream,
            control_monitor,
        }
    }};
}
