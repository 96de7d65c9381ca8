use defmt::info;

pub struct Hardware<'a> {
    pub usb: crate::usb::UsbHardware<'a>,
    pub mic: crate::mic_task::hardware::MicHardware<'a>,
}

impl<'a> Hardware<'a> {
    pub fn get() -> Hardware<'a> {
        info!("Initializing");

        let mut config = embassy_stm32::Config::default();
        {
            use embassy_stm32::rcc::*;
            config.rcc.hsi = Some(HSIPrescaler::DIV1);
            config.rcc.csi = true;
            config.rcc.hsi48 = Some(Hsi48Config { sync_from_usb: true }); // needed for USB
            config.rcc.pll1 = Some(Pll {
                source: PllSource::HSI,
                prediv: PllPreDiv::DIV4,
                mul: PllMul::MUL50,
                divp: Some(PllDiv::DIV2), // 400 MHz
                divq: None,
                divr: None,
            });
            config.rcc.sys = Sysclk::PLL1_P; // 400 MHz
            config.rcc.ahb_pre = AHBPrescaler::DIV2; // 200 MHz
            config.rcc.apb1_pre = APBPrescaler::DIV2; // 100 MHz
            config.rcc.apb2_pre = APBPrescaler::DIV2; // 100 MHz
            config.rcc.apb3_pre = APBPrescaler::DIV2; // 100 MHz
            config.rcc.apb4_pre = APBPrescaler::DIV2; // 100 MHz
            config.rcc.voltage_scale = VoltageScale::Scale1;
            config.rcc.mux.usbsel = mux::Usbsel::HSI48;
        }
        let peripherals = embassy_stm32::init(config);

        let usb = crate::get_usb_hardware!(peripherals);
        let mic = crate::get_mic_hardware!(peripherals);

        Hardware { usb, mic }
    }
}
