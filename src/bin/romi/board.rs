// Concrete types for the parts wired to the Nucleo-F446RE
//
//   left motor   PWM PB6 (TIM4 ch1)  DIR PB10  SLP PB3
//   right motor  PWM PB7 (TIM4 ch2)  DIR PA10  SLP PB13
//   encoders     left TIM2 PA0/PA1, right TIM1 PA8/PA9
//   line array   L2 PC0, L1 PA7, M PA6, R1 PA5, R2 PC1, H PA4 (ADC1)
//   calibration  PC3 (ADC1), pulled to ground by the jumper
//   IMU          BNO055 on I2C1 PB8/PB9
//   ultrasonic   trigger PB5, echo PB4 (EXTI4)
//   servos       sensor PB0 (TIM3 ch3), blindfold PB1 (TIM3 ch4)
//   console      USART2 TX PA2

use crate::sensors::AnalogSensors;
use romi::drivers::encoder::quadrature::QeiWrapper;
use romi::drivers::imu::bno055::Bno055;
use romi::drivers::motor::l6206::L6206;
use romi::drivers::servo::mg90s::MG90S;
use romi::navigation::task::NavigationTask;
use romi::tasks::{heading::HeadingTask, ranging::RangingTask, servo::ServoTask};
use stm32f4xx_hal::{
    gpio::{Alternate, Input, Output, Pin, PushPull, PB8, PB9},
    i2c::I2c,
    pac::{I2C1, TIM1, TIM2, TIM3, TIM4},
    qei::Qei,
    timer::pwm::PwmChannel,
};

pub type LeftMotor =
    L6206<PwmChannel<TIM4, 0>, Pin<'B', 10, Output<PushPull>>, Pin<'B', 3, Output<PushPull>>>;
pub type RightMotor =
    L6206<PwmChannel<TIM4, 1>, Pin<'A', 10, Output<PushPull>>, Pin<'B', 13, Output<PushPull>>>;

pub type LeftEncoder =
    QeiWrapper<Qei<TIM2, (Pin<'A', 0, Alternate<1>>, Pin<'A', 1, Alternate<1>>)>>;
pub type RightEncoder =
    QeiWrapper<Qei<TIM1, (Pin<'A', 8, Alternate<1>>, Pin<'A', 9, Alternate<1>>)>>;

pub type Imu = Bno055<I2c<I2C1, (PB8, PB9)>>;

pub type SensorServo = MG90S<PwmChannel<TIM3, 2>>;
pub type BlindfoldServo = MG90S<PwmChannel<TIM3, 3>>;

pub type Trigger = Pin<'B', 5, Output<PushPull>>;
pub type Echo = Pin<'B', 4, Input>;

pub type Navigation =
    NavigationTask<'static, LeftMotor, RightMotor, LeftEncoder, RightEncoder, AnalogSensors>;
pub type Heading = HeadingTask<'static, Imu>;
pub type Ranging = RangingTask<'static, Trigger>;
pub type Servos = ServoTask<'static, SensorServo, BlindfoldServo>;
