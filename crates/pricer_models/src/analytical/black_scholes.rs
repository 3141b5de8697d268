//! Black-Scholes pricing model for European options.
//!
//! ## Mathematical Formulas
//!
//! **Call Price**: C = S·N(d₁) - K·e^(-rT)·N(d₂)
//! **Put Price**: P = K·e^(-rT)·N(-d₂) - S·N(-d₁)
//!
//! Where:
//! - d₁ = (ln(S/K) + (r + σ²/2)T) / (σ√T)
//! - d₂ = d₁ - σ√T

use super::distributions::{norm_cdf, norm_pdf};
use super::error::AnalyticalError;
use crate::instruments::OptionKind;

/// Expiries at or below this are treated as already expired.
const EXPIRY_EPSILON: f64 = 1e-12;

/// Black-Scholes model for European option pricing.
///
/// # Examples
/// ```
/// use pricer_models::analytical::BlackScholes;
/// use pricer_models::instruments::OptionKind;
///
/// let bs = BlackScholes::new(100.0, 0.05, 0.2).unwrap();
/// let call = bs.price(OptionKind::Call, 100.0, 1.0);
/// let put = bs.price(OptionKind::Put, 100.0, 1.0);
///
/// // Put-call parity: C - P = S - K*exp(-rT)
/// let parity = call - put - (100.0 - 100.0 * (-0.05_f64).exp());
/// assert!(parity.abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlackScholes {
    spot: f64,
    rate: f64,
    volatility: f64,
}

impl BlackScholes {
    /// Creates a new Black-Scholes model.
    ///
    /// # Errors
    /// - `AnalyticalError::InvalidSpot` if spot is not positive and finite
    /// - `AnalyticalError::InvalidVolatility` if volatility is not positive and finite
    /// - `AnalyticalError::InvalidRate` if rate is not finite
    pub fn new(spot: f64, rate: f64, volatility: f64) -> Result<Self, AnalyticalError> {
        if !(spot > 0.0 && spot.is_finite()) {
            return Err(AnalyticalError::InvalidSpot { spot });
        }
        if !(volatility > 0.0 && volatility.is_finite()) {
            return Err(AnalyticalError::InvalidVolatility { volatility });
        }
        if !rate.is_finite() {
            return Err(AnalyticalError::InvalidRate { rate });
        }
        Ok(Self {
            spot,
            rate,
            volatility,
        })
    }

    /// Returns the spot price.
    #[inline]
    pub fn spot(&self) -> f64 {
        self.spot
    }

    /// Returns the risk-free rate.
    #[inline]
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Returns the volatility.
    #[inline]
    pub fn volatility(&self) -> f64 {
        self.volatility
    }

    /// d₁ = (ln(S/K) + (r + σ²/2)T) / (σ√T)
    ///
    /// For an expired option returns ±∞ by moneyness (0 at the money).
    #[inline]
    pub fn d1(&self, strike: f64, expiry: f64) -> f64 {
        if expiry <= EXPIRY_EPSILON {
            return if self.spot > strike {
                f64::INFINITY
            } else if self.spot < strike {
                f64::NEG_INFINITY
            } else {
                0.0
            };
        }
        let vol_sqrt_t = self.volatility * expiry.sqrt();
        ((self.spot / strike).ln() + (self.rate + 0.5 * self.volatility * self.volatility) * expiry)
            / vol_sqrt_t
    }

    /// d₂ = d₁ - σ√T
    #[inline]
    pub fn d2(&self, strike: f64, expiry: f64) -> f64 {
        if expiry <= EXPIRY_EPSILON {
            return self.d1(strike, expiry);
        }
        self.d1(strike, expiry) - self.volatility * expiry.sqrt()
    }

    /// European option price. Collapses to intrinsic value at expiry.
    pub fn price(&self, kind: OptionKind, strike: f64, expiry: f64) -> f64 {
        if expiry <= EXPIRY_EPSILON {
            return kind.intrinsic(self.spot, strike);
        }
        let d1 = self.d1(strike, expiry);
        let d2 = self.d2(strike, expiry);
        let discounted_strike = strike * (-self.rate * expiry).exp();

        match kind {
            OptionKind::Call => self.spot * norm_cdf(d1) - discounted_strike * norm_cdf(d2),
            OptionKind::Put => discounted_strike * norm_cdf(-d2) - self.spot * norm_cdf(-d1),
        }
    }

    /// Delta (∂V/∂S): N(d₁) for calls, N(d₁) - 1 for puts.
    pub fn delta(&self, kind: OptionKind, strike: f64, expiry: f64) -> f64 {
        let n_d1 = norm_cdf(self.d1(strike, expiry));
        match kind {
            OptionKind::Call => n_d1,
            OptionKind::Put => n_d1 - 1.0,
        }
    }

    /// Gamma (∂²V/∂S²) = φ(d₁) / (S·σ·√T), identical for calls and puts.
    pub fn gamma(&self, strike: f64, expiry: f64) -> f64 {
        if expiry <= EXPIRY_EPSILON {
            return 0.0;
        }
        norm_pdf(self.d1(strike, expiry)) / (self.spot * self.volatility * expiry.sqrt())
    }

    /// Vega (∂V/∂σ) = S·√T·φ(d₁), identical for calls and puts.
    pub fn vega(&self, strike: f64, expiry: f64) -> f64 {
        if expiry <= EXPIRY_EPSILON {
            return 0.0;
        }
        self.spot * expiry.sqrt() * norm_pdf(self.d1(strike, expiry))
    }

    /// Theta (∂V/∂t), the calendar-time decay -∂V/∂T.
    ///
    /// - Call Theta = -(S·σ·φ(d₁))/(2√T) - r·K·e^(-rT)·N(d₂)
    /// - Put Theta = -(S·σ·φ(d₁))/(2√T) + r·K·e^(-rT)·N(-d₂)
    pub fn theta(&self, kind: OptionKind, strike: f64, expiry: f64) -> f64 {
        if expiry <= EXPIRY_EPSILON {
            return 0.0;
        }
        let d1 = self.d1(strike, expiry);
        let d2 = self.d2(strike, expiry);
        let discounted_strike = strike * (-self.rate * expiry).exp();
        let time_value = self.spot * self.volatility * norm_pdf(d1) / (2.0 * expiry.sqrt());

        match kind {
            OptionKind::Call => -time_value - self.rate * discounted_strike * norm_cdf(d2),
            OptionKind::Put => -time_value + self.rate * discounted_strike * norm_cdf(-d2),
        }
    }

}

/// Black-Scholes delta with raw inputs, used as a hedge ratio along paths.
///
/// Inputs are not validated: a non-positive `maturity` gives the expiry
/// step function and a non-positive `vol` is treated as expired.
///
/// # Examples
/// ```
/// use pricer_models::analytical::closed_form_delta;
/// use pricer_models::instruments::OptionKind;
///
/// let d = closed_form_delta(100.0, 100.0, 0.2, 0.05, 1.0, OptionKind::Call);
/// assert!((d - 0.636_830_651).abs() < 1e-8);
/// ```
pub fn closed_form_delta(
    spot: f64,
    strike: f64,
    vol: f64,
    rate: f64,
    maturity: f64,
    kind: OptionKind,
) -> f64 {
    let n_d1 = if maturity <= EXPIRY_EPSILON || vol <= 0.0 {
        if spot > strike {
            1.0
        } else if spot < strike {
            0.0
        } else {
            0.5
        }
    } else {
        let vol_sqrt_t = vol * maturity.sqrt();
        let d1 = ((spot / strike).ln() + (rate + 0.5 * vol * vol) * maturity) / vol_sqrt_t;
        norm_cdf(d1)
    };
    match kind {
        OptionKind::Call => n_d1,
        OptionKind::Put => n_d1 - 1.0,
    }
}

/// Black-Scholes price with raw inputs, used to value holding along paths.
///
/// Inputs are not validated. A non-positive `maturity` or `vol` gives the
/// deterministic value, the intrinsic value against the discounted strike.
///
/// # Examples
/// ```
/// use pricer_models::analytical::{closed_form_price, BlackScholes};
/// use pricer_models::instruments::OptionKind;
///
/// let p = closed_form_price(100.0, 100.0, 0.2, 0.05, 1.0, OptionKind::Call);
/// let bs = BlackScholes::new(100.0, 0.05, 0.2).unwrap();
/// assert!((p - bs.price(OptionKind::Call, 100.0, 1.0)).abs() < 1e-12);
/// ```
pub fn closed_form_price(
    spot: f64,
    strike: f64,
    vol: f64,
    rate: f64,
    maturity: f64,
    kind: OptionKind,
) -> f64 {
    if maturity <= EXPIRY_EPSILON || vol <= 0.0 {
        let expiry = maturity.max(0.0);
        return kind.intrinsic(spot, strike * (-rate * expiry).exp());
    }
    let vol_sqrt_t = vol * maturity.sqrt();
    let d1 = ((spot / strike).ln() + (rate + 0.5 * vol * vol) * maturity) / vol_sqrt_t;
    let d2 = d1 - vol_sqrt_t;
    let discounted_strike = strike * (-rate * maturity).exp();
    match kind {
        OptionKind::Call => spot * norm_cdf(d1) - discounted_strike * norm_cdf(d2),
        OptionKind::Put => discounted_strike * norm_cdf(-d2) - spot * norm_cdf(-d1),
    }
}
