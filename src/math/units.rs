//! Physical unit markers and typed scalar quantities.
//!
//! A [`Quantity`] carries its unit in the type, so adding meters to seconds or
//! passing a velocity where a length is expected does not compile. Products and
//! quotients are only defined between units that declare a relation through
//! [`UnitMul`] / [`UnitDiv`].

use std::cmp::Ordering;
use std::fmt;
use std::iter::Sum;
use std::marker::PhantomData;
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

/// Marker trait for a physical unit.
pub trait Unit: Copy + Default + fmt::Debug + PartialEq + 'static {
    /// Symbol used when formatting quantities.
    const SYMBOL: &'static str;
}

/// `Self * Rhs` has unit `Output`.
pub trait UnitMul<Rhs: Unit>: Unit {
    type Output: Unit;
}

/// `Self / Rhs` has unit `Output`.
pub trait UnitDiv<Rhs: Unit>: Unit {
    type Output: Unit;
}

macro_rules! units {
    ($($(#[$meta:meta])* $name:ident => $symbol:literal),* $(,)?) => {
        $(
            $(#[$meta])*
            #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
            pub struct $name;

            impl Unit for $name {
                const SYMBOL: &'static str = $symbol;
            }
        )*
    };
}

units! {
    /// Dimensionless.
    Scalar => "",
    Meters => "m",
    SquaredMeters => "m^2",
    Seconds => "s",
    MetersPerSecond => "m/s",
    MetersPerSquaredSecond => "m/s^2",
    Kilograms => "kg",
    /// Momentum.
    KilogramMetersPerSecond => "kg*m/s",
}

impl<U: Unit> UnitMul<Scalar> for U {
    type Output = U;
}

impl<U: Unit> UnitDiv<Scalar> for U {
    type Output = U;
}

/// Declares `Scalar * U = U` and `U / U = Scalar` for non-scalar units.
macro_rules! dimensioned {
    ($($unit:ty),*) => {
        $(
            impl UnitMul<$unit> for Scalar {
                type Output = $unit;
            }

            impl UnitDiv<$unit> for $unit {
                type Output = Scalar;
            }
        )*
    };
}

dimensioned!(
    Meters,
    SquaredMeters,
    Seconds,
    MetersPerSecond,
    MetersPerSquaredSecond,
    Kilograms,
    KilogramMetersPerSecond
);

/// Declares `A * B = C` together with both commuted product and both quotients.
macro_rules! product {
    ($a:ident * $a2:ident = $c:ident; square) => {
        impl UnitMul<$a2> for $a {
            type Output = $c;
        }

        impl UnitDiv<$a> for $c {
            type Output = $a;
        }
    };
    ($a:ident * $b:ident = $c:ident) => {
        impl UnitMul<$b> for $a {
            type Output = $c;
        }

        impl UnitMul<$a> for $b {
            type Output = $c;
        }

        impl UnitDiv<$b> for $c {
            type Output = $a;
        }

        impl UnitDiv<$a> for $c {
            type Output = $b;
        }
    };
}

product!(MetersPerSecond * Seconds = Meters);
product!(MetersPerSquaredSecond * Seconds = MetersPerSecond);
product!(Kilograms * MetersPerSecond = KilogramMetersPerSecond);
product!(Meters * Meters = SquaredMeters; square);

/// A scalar value tagged with its unit.
#[derive(Clone, Copy, Default)]
pub struct Quantity<U: Unit> {
    value: f64,
    unit: PhantomData<U>,
}

pub type Ratio = Quantity<Scalar>;
pub type Length = Quantity<Meters>;
pub type Area = Quantity<SquaredMeters>;
pub type Time = Quantity<Seconds>;
pub type Speed = Quantity<MetersPerSecond>;
pub type Acceleration = Quantity<MetersPerSquaredSecond>;
pub type Mass = Quantity<Kilograms>;
pub type Momentum = Quantity<KilogramMetersPerSecond>;

pub const fn meters(value: f64) -> Length {
    Quantity::new(value)
}

pub const fn seconds(value: f64) -> Time {
    Quantity::new(value)
}

pub const fn kilograms(value: f64) -> Mass {
    Quantity::new(value)
}

pub const fn meters_per_second(value: f64) -> Speed {
    Quantity::new(value)
}

pub const fn meters_per_squared_second(value: f64) -> Acceleration {
    Quantity::new(value)
}

pub const fn ratio(value: f64) -> Ratio {
    Quantity::new(value)
}

impl<U: Unit> Quantity<U> {
    pub const ZERO: Self = Self::new(0.0);

    #[inline]
    pub const fn new(value: f64) -> Self {
        Self {
            value,
            unit: PhantomData,
        }
    }

    /// Raw magnitude in the base unit.
    #[inline]
    pub const fn value(self) -> f64 {
        self.value
    }

    #[inline]
    pub fn abs(self) -> Self {
        Self::new(self.value.abs())
    }

    #[inline]
    pub fn min(self, other: Self) -> Self {
        Self::new(self.value.min(other.value))
    }

    #[inline]
    pub fn max(self, other: Self) -> Self {
        Self::new(self.value.max(other.value))
    }

    #[inline]
    pub fn is_zero(self) -> bool {
        self.value == 0.0
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.value.is_finite()
    }

    /// Total ordering, used to keep earliest-impact selection deterministic.
    #[inline]
    pub fn total_cmp(&self, other: &Self) -> Ordering {
        self.value.total_cmp(&other.value)
    }

    #[inline]
    pub fn squared(self) -> Quantity<<U as UnitMul<U>>::Output>
    where
        U: UnitMul<U>,
    {
        Quantity::new(self.value * self.value)
    }
}

impl Quantity<SquaredMeters> {
    #[inline]
    pub fn sqrt(self) -> Length {
        Quantity::new(self.value.sqrt())
    }
}

impl<U: Unit> fmt::Debug for Quantity<U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}{}", self.value, U::SYMBOL)
    }
}

impl<U: Unit> fmt::Display for Quantity<U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if U::SYMBOL.is_empty() {
            write!(f, "{}", self.value)
        } else {
            write!(f, "{} {}", self.value, U::SYMBOL)
        }
    }
}

impl<U: Unit> PartialEq for Quantity<U> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<U: Unit> PartialOrd for Quantity<U> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.value.partial_cmp(&other.value)
    }
}

impl<U: Unit> Add for Quantity<U> {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.value + rhs.value)
    }
}

impl<U: Unit> AddAssign for Quantity<U> {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        self.value += rhs.value;
    }
}

impl<U: Unit> Sub for Quantity<U> {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.value - rhs.value)
    }
}

impl<U: Unit> SubAssign for Quantity<U> {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        self.value -= rhs.value;
    }
}

impl<U: Unit> Neg for Quantity<U> {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.value)
    }
}

impl<U: Unit> Mul<f64> for Quantity<U> {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: f64) -> Self {
        Self::new(self.value * rhs)
    }
}

impl<U: Unit> Mul<Quantity<U>> for f64 {
    type Output = Quantity<U>;

    #[inline]
    fn mul(self, rhs: Quantity<U>) -> Quantity<U> {
        Quantity::new(self * rhs.value)
    }
}

impl<U: Unit> Div<f64> for Quantity<U> {
    type Output = Self;

    #[inline]
    fn div(self, rhs: f64) -> Self {
        Self::new(self.value / rhs)
    }
}

impl<A, B> Mul<Quantity<B>> for Quantity<A>
where
    A: UnitMul<B>,
    B: Unit,
{
    type Output = Quantity<<A as UnitMul<B>>::Output>;

    #[inline]
    fn mul(self, rhs: Quantity<B>) -> Self::Output {
        Quantity::new(self.value * rhs.value)
    }
}

impl<A, B> Div<Quantity<B>> for Quantity<A>
where
    A: UnitDiv<B>,
    B: Unit,
{
    type Output = Quantity<<A as UnitDiv<B>>::Output>;

    #[inline]
    fn div(self, rhs: Quantity<B>) -> Self::Output {
        Quantity::new(self.value / rhs.value)
    }
}

impl<U: Unit> Sum for Quantity<U> {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}
