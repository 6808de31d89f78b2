//! Fixed option sets of the employee record
//!
//! Each enum serializes to the exact string stored in the `empleados` table.
//! `label()` is what the UI shows; it only differs from the stored value for
//! a handful of options.

use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

macro_rules! option_set {
    (
        $(#[$meta:meta])*
        $name:ident, field = $field:literal {
            $( $variant:ident => $value:literal $(as $label:literal)? ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub enum $name {
            $( #[serde(rename = $value)] $variant, )+
        }

        impl $name {
            /// Every option, in display order
            pub const ALL: &'static [$name] = &[$( $name::$variant ),+];

            /// Column this option set belongs to
            pub const FIELD: &'static str = $field;

            /// Stored string
            pub fn as_str(&self) -> &'static str {
                match self {
                    $( $name::$variant => $value, )+
                }
            }

            /// Display label
            pub fn label(&self) -> &'static str {
                match self {
                    $( $name::$variant => option_set!(@label $value $(, $label)?), )+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = AppError;

            /// Accepts the stored value or the display label
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.trim();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|o| o.as_str() == s || o.label() == s)
                    .ok_or_else(|| AppError::invalid_option($field, s))
            }
        }
    };
    (@label $value:literal) => { $value };
    (@label $value:literal, $label:literal) => { $label };
}

option_set! {
    /// Sex as recorded on the identity document
    Sexo, field = "sexo" {
        Masculino => "Masculino",
        Femenino => "Femenino",
    }
}

option_set! {
    /// Marital status
    EstadoCivil, field = "estado_civil" {
        Casado => "Casado/a",
        Divorciado => "Divorciado/a",
        Soltero => "Soltero/a",
        Viudo => "Viudo/a",
        AcuerdoUnionCivil => "Acuerdo de Unión Civil",
        Separado => "Separado/a",
    }
}

option_set! {
    /// Bank holding the salary account
    Banco, field = "banco" {
        ChileEdwards => "CHILE EDWARDS",
        BancoEstado => "BANCOESTADO",
        Scotiabank => "SCOTIABANK",
        BciTbanc => "BCI TBANC",
        Corpbanca => "CORPBANCA",
        Bice => "BICE",
        Hsbc => "HSBC",
        Santander => "SANTANDER",
        Itau => "ITAU",
        Security => "SECURITY",
        Bbva => "BBVA",
        DelDesarrollo => "DEL DESARROLLO",
        Falabella => "FALABELLA",
        Ripley => "RIPLEY",
        Rabobank => "RABOBANK",
        Consorcio => "CONSORCIO",
        Paris => "PARIS",
        Internacional => "INTERNACIONAL",
    }
}

impl Banco {
    /// Maximum account-number digits accepted for this bank, if capped
    pub fn max_account_digits(&self) -> Option<usize> {
        match self {
            Banco::BancoEstado => Some(8),
            _ => None,
        }
    }
}

option_set! {
    /// Account type
    TipoCuenta, field = "tipo_cuenta" {
        CuentaCorriente => "Cuenta Corriente",
        CuentaAhorro => "Cuenta de Ahorro",
        CuentaVista => "Cuenta Vista",
    }
}

option_set! {
    /// Pension fund (AFP)
    FondoCotizacion, field = "fondo_cotizacion" {
        Capital => "Capital",
        Cuprum => "Cuprum",
        Habitat => "Habitat",
        Modelo => "Modelo",
        PlanVital => "PlanVital",
        ProVida => "ProVida",
        Uno => "Uno",
    }
}

option_set! {
    /// Health insurance provider
    Salud, field = "salud" {
        Fonasa => "Fonasa",
        Banmedica => "Banmedica",
        Colmena => "Colmena",
        Consalud => "Consalud",
        CruzBlanca => "Cruz Blanca",
        NuevaMasvida => "Nueva Masvida",
        VidaTres => "Vida Tres",
        BancoEstado => "Banco Estado",
        Isalud => "ISALUD" as "ISALUD Isapre de Codelco",
        CruzDelNorte => "Cruz del Norte",
        Esencial => "Esencial",
        NoCotiza => "No Cotiza Salud",
    }
}

option_set! {
    /// Unemployment insurance seniority
    Afc, field = "afc" {
        MenosDe11 => "Menos de 11 Años",
        MasDe11 => "Más de 11 Años",
        NoCotiza => "No Cotiza",
    }
}

option_set! {
    /// Upper-body garment size
    TallaSuperior, field = "talla_superior" {
        Xs => "XS",
        S => "S",
        M => "M",
        L => "L",
        Xl => "XL",
        Xxl => "XXL",
    }
}

option_set! {
    /// Trouser size with its letter equivalent
    TallaInferior, field = "talla_inferior" {
        T38 => "38 (S)",
        T40 => "40 (M)",
        T42 => "42 (M)",
        T44 => "44 (L)",
        T46 => "46 (L)",
        T48 => "48 (XL)",
        T50 => "50 (XL)",
        T52 => "52 (XXL)",
        T54 => "54 (XXL)",
        T56 => "56 (XXL)",
        T58 => "58 (XXL)",
        T60 => "60 (XXL)",
    }
}

/// Supported shoe sizes
pub const TALLAS_ZAPATO: std::ops::RangeInclusive<u8> = 36..=46;

/// Parse and range-check a shoe size
pub fn parse_talla_zapato(s: &str) -> Result<u8, AppError> {
    let size: u8 = s
        .trim()
        .parse()
        .map_err(|_| AppError::new(crate::error::ErrorCode::ShoeSizeOutOfRange))?;
    if TALLAS_ZAPATO.contains(&size) {
        Ok(size)
    } else {
        Err(AppError::new(crate::error::ErrorCode::ShoeSizeOutOfRange).with_detail("value", size))
    }
}
