#![no_main]
#![no_std]

mod board;
mod config {
    pub mod sys_config;
}
mod logger;
mod sensors;

use romi::share::Share;
use romi::tasks::servo::{Blindfold, ServoDirection};

// cross-task cells, each with a single writing task
static SER_DIR: Share<ServoDirection> = Share::new();
static IMU_YAW: Share<f32> = Share::new();
static ULS_DIS: Share<f32> = Share::new();
static CLOSE: Share<Blindfold> = Share::new();

#[rtic::app(device = stm32f4xx_hal::pac, peripherals = true, dispatchers = [SPI1, SPI2, SPI3, SPI4])]
mod app {
    use crate::board;
    use crate::config::sys_config;
    use crate::logger;
    use crate::sensors::AnalogSensors;
    use crate::{CLOSE, IMU_YAW, SER_DIR, ULS_DIS};
    use cortex_m::asm;
    use panic_write::PanicHandler;
    use romi::config::tuning;
    use romi::controller::drive::Drive;
    use romi::drivers::encoder::quadrature::QeiWrapper;
    use romi::drivers::imu::bno055::Bno055;
    use romi::drivers::motor::l6206::L6206;
    use romi::drivers::ranging::hcsr04::{EchoCapture, HcSr04};
    use romi::drivers::servo::mg90s::MG90S;
    use romi::navigation::task::NavigationTask;
    use romi::tasks::heading::HeadingTask;
    use romi::tasks::ranging::RangingTask;
    use romi::tasks::servo::ServoTask;
    use stm32f4xx_hal::{
        adc::{config::AdcConfig, Adc},
        gpio::Edge,
        i2c::{I2c, Mode as i2cMode},
        pac::{TIM11, TIM5},
        prelude::*,
        qei::Qei,
        serial::{Config, Serial},
        timer::{CounterUs, Delay},
    };
    use systick_monotonic::{fugit::Duration, Systick};

    #[shared]
    struct Shared {
        // free-running microsecond counter for echo timing
        clock: CounterUs<TIM5>,
        echo: EchoCapture,
    }

    #[local]
    struct Local {
        nav: board::Navigation,
        heading: board::Heading,
        servos: board::Servos,
        ranging: board::Ranging,
        delay: Delay<TIM11, 1_000_000>,
        echo_pin: board::Echo,
    }

    #[monotonic(binds = SysTick, default = true)]
    type MonoTimer = Systick<1000>;

    #[init]
    fn init(ctx: init::Context) -> (Shared, Local, init::Monotonics) {
        let dp = ctx.device;

        // configure clocks
        let rcc = dp.RCC.constrain();
        let mono = Systick::new(ctx.core.SYST, sys_config::SYSCLK_HZ);
        let clocks = rcc.cfgr.sysclk(sys_config::SYSCLK_HZ.Hz()).freeze();
        let mut syscfg = dp.SYSCFG.constrain();
        let mut exti = dp.EXTI;

        let gpioa = dp.GPIOA.split();
        let gpiob = dp.GPIOB.split();
        let gpioc = dp.GPIOC.split();

        // set up uart tx, shared by the logger and the panic handler
        let tx_pin = gpioa.pa2.into_alternate();
        let serial = Serial::tx(
            dp.USART2,
            tx_pin,
            Config::default()
                .baudrate(115200.bps())
                .wordlength_8()
                .parity_none(),
            &clocks,
        )
        .unwrap();
        logger::init(PanicHandler::new(serial), sys_config::LOG_LEVEL);

        let mut delay = dp.TIM11.delay_us(&clocks);
        let mut clock = dp.TIM5.counter_us(&clocks);
        clock.start(u32::MAX.micros()).unwrap();

        // IMU
        let i2c = I2c::new(
            dp.I2C1,
            (gpiob.pb8, gpiob.pb9),
            i2cMode::Standard {
                frequency: sys_config::I2C_FREQUENCY_KHZ.kHz(),
            },
            &clocks,
        );
        let mut imu: board::Imu = Bno055::new(i2c, sys_config::IMU_ADDRESS);
        if let Err(e) = imu.init(&mut delay) {
            log::error!("imu initialization failed: {:?}", e);
            panic!("imu initialization failed");
        }

        // drive
        let (pwm_left, pwm_right) = dp
            .TIM4
            .pwm_hz(
                (gpiob.pb6.into_alternate(), gpiob.pb7.into_alternate()),
                sys_config::MOTOR_PWM_HZ.Hz(),
                &clocks,
            )
            .split();
        let left_motor: board::LeftMotor = L6206::new(
            pwm_left,
            gpiob.pb10.into_push_pull_output(),
            gpiob.pb3.into_push_pull_output(),
        );
        let right_motor: board::RightMotor = L6206::new(
            pwm_right,
            gpioa.pa10.into_push_pull_output(),
            gpiob.pb13.into_push_pull_output(),
        );
        let drive = Drive::new(
            left_motor,
            right_motor,
            tuning::WHEEL_TUNING,
            tuning::MOTOR_DIRECTIONS,
        );

        let left_encoder: board::LeftEncoder = QeiWrapper::new(
            Qei::new(dp.TIM2, (gpioa.pa0.into_alternate(), gpioa.pa1.into_alternate())),
            sys_config::LEFT_ENCODER_COUNTER_MAX,
        );
        let right_encoder: board::RightEncoder = QeiWrapper::new(
            Qei::new(dp.TIM1, (gpioa.pa8.into_alternate(), gpioa.pa9.into_alternate())),
            sys_config::RIGHT_ENCODER_COUNTER_MAX,
        );

        let sensors = AnalogSensors {
            adc: Adc::adc1(dp.ADC1, true, AdcConfig::default()),
            l2: gpioc.pc0.into_analog(),
            l1: gpioa.pa7.into_analog(),
            m: gpioa.pa6.into_analog(),
            r1: gpioa.pa5.into_analog(),
            r2: gpioc.pc1.into_analog(),
            h: gpioa.pa4.into_analog(),
            calibration: gpioc.pc3.into_analog(),
        };

        // servos
        let (pwm_sensor, pwm_blindfold) = dp
            .TIM3
            .pwm_hz(
                (gpiob.pb0.into_alternate(), gpiob.pb1.into_alternate()),
                sys_config::SERVO_PWM_HZ.Hz(),
                &clocks,
            )
            .split();

        // ultrasonic
        let trigger: board::Trigger = gpiob.pb5.into_push_pull_output();
        let mut echo_pin: board::Echo = gpiob.pb4.into_pull_down_input();
        echo_pin.make_interrupt_source(&mut syscfg);
        echo_pin.trigger_on_edge(&mut exti, Edge::RisingFalling);
        echo_pin.enable_interrupt(&mut exti);

        let (Some(ser_dir), Some(close), Some(imu_yaw), Some(mut uls_dis)) = (
            SER_DIR.writer(),
            CLOSE.writer(),
            IMU_YAW.writer(),
            ULS_DIS.writer(),
        ) else {
            panic!("shared cell writer already taken");
        };
        uls_dis.put(sys_config::RANGE_UNKNOWN_CM);

        let nav = NavigationTask::new(
            drive,
            left_encoder,
            right_encoder,
            sensors,
            sys_config::SECONDS_PER_TICK,
            IMU_YAW.reader(),
            ULS_DIS.reader(),
            ser_dir,
            close,
        );
        let heading = HeadingTask::new(imu, imu_yaw);
        let ranging = RangingTask::new(HcSr04::new(trigger), uls_dis, sys_config::ECHO_TIMEOUT_US);
        let servos = ServoTask::new(
            MG90S::new(pwm_sensor),
            MG90S::new(pwm_blindfold),
            SER_DIR.reader(),
            CLOSE.reader(),
        );

        log::info!("system initialized");

        let startup = Duration::<u64, 1, 1000>::millis(sys_config::STARTUP_DELAY_MS);
        update_heading::spawn_after(startup).unwrap();
        measure_range::spawn_after(startup).unwrap();
        move_servos::spawn_after(startup).unwrap();
        navigate::spawn_after(startup).unwrap();

        (
            Shared {
                clock,
                echo: EchoCapture::new(),
            },
            Local {
                nav,
                heading,
                servos,
                ranging,
                delay,
                echo_pin,
            },
            init::Monotonics(mono),
        )
    }

    #[task(priority = 4, local = [nav])]
    fn navigate(cx: navigate::Context) {
        cx.local.nav.step(monotonics::now().ticks());
        navigate::spawn_after(Duration::<u64, 1, 1000>::millis(
            sys_config::NAVIGATION_PERIOD_MS,
        ))
        .unwrap();
    }

    #[task(priority = 3, local = [heading])]
    fn update_heading(cx: update_heading::Context) {
        cx.local.heading.step();
        update_heading::spawn_after(Duration::<u64, 1, 1000>::millis(
            sys_config::HEADING_PERIOD_MS,
        ))
        .unwrap();
    }

    #[task(priority = 2, local = [servos])]
    fn move_servos(cx: move_servos::Context) {
        cx.local.servos.step();
        move_servos::spawn_after(Duration::<u64, 1, 1000>::millis(
            sys_config::SERVO_PERIOD_MS,
        ))
        .unwrap();
    }

    #[task(priority = 1, local = [ranging, delay], shared = [clock, echo])]
    fn measure_range(mut cx: measure_range::Context) {
        let now = cx.shared.clock.lock(|clock| clock.now().ticks());
        let ranging = cx.local.ranging;
        let delay = cx.local.delay;
        cx.shared
            .echo
            .lock(|echo| ranging.step(echo, delay, now));
        measure_range::spawn_after(Duration::<u64, 1, 1000>::millis(
            sys_config::RANGING_PERIOD_MS,
        ))
        .unwrap();
    }

    // timestamps both edges of the echo pulse
    #[task(binds = EXTI4, priority = 5, local = [echo_pin], shared = [clock, echo])]
    fn echo_edge(mut cx: echo_edge::Context) {
        cx.local.echo_pin.clear_interrupt_pending_bit();
        let now = cx.shared.clock.lock(|clock| clock.now().ticks());
        let high = cx.local.echo_pin.is_high();
        cx.shared.echo.lock(|echo| echo.on_edge(high, now));
    }

    #[idle]
    fn idle(_ctx: idle::Context) -> ! {
        loop {
            asm::nop();
        }
    }
}
