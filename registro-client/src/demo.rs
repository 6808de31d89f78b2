//! Deterministic sample employees for `--demo` and tests

use chrono::{Duration, NaiveDate, TimeZone, Utc};
use shared::catalog::regions;
use shared::models::{
    Afc, Banco, Empleado, EstadoCivil, FondoCotizacion, Salud, Sexo, TallaInferior, TallaSuperior,
    TipoCuenta,
};
use uuid::Uuid;

const NOMBRES: [(&str, Sexo); 12] = [
    ("Camila", Sexo::Femenino),
    ("Matías", Sexo::Masculino),
    ("Valentina", Sexo::Femenino),
    ("Benjamín", Sexo::Masculino),
    ("Javiera", Sexo::Femenino),
    ("Vicente", Sexo::Masculino),
    ("Constanza", Sexo::Femenino),
    ("Joaquín", Sexo::Masculino),
    ("Francisca", Sexo::Femenino),
    ("Tomás", Sexo::Masculino),
    ("Antonia", Sexo::Femenino),
    ("Cristóbal", Sexo::Masculino),
];

const APELLIDOS: [&str; 10] = [
    "González", "Muñoz", "Rojas", "Díaz", "Pérez", "Soto", "Contreras", "Silva", "Martínez",
    "Sepúlveda",
];

const CALLES: [&str; 5] = ["Av. Grecia", "Balmaceda", "Latorre", "Sotomayor", "Av. Brasil"];

const TAGS: [Option<&str>; 4] = [Some("NV499"), Some("NV512"), Some("NV000"), None];

/// `n` employees with varied options, tags and creation times
pub fn seed_empleados(n: usize) -> Vec<Empleado> {
    let base = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).single().unwrap_or_else(Utc::now);
    let regiones = regions::regions();

    (0..n)
        .map(|i| {
            let (nombre, sexo) = NOMBRES[i % NOMBRES.len()];
            let apellido = APELLIDOS[(i / 3) % APELLIDOS.len()];
            let segundo = APELLIDOS[(i + 4) % APELLIDOS.len()];
            let region = &regiones[i % regiones.len()];
            let comuna = region.comunas[i % region.comunas.len()];
            let calle = CALLES[i % CALLES.len()];
            let numero = 100 + (i * 37) % 2900;
            let banco = Banco::ALL[i % Banco::ALL.len()];
            let numero_cuenta = if banco.max_account_digits().is_some() {
                format!("{:08}", 10_000_000 + i * 7919 % 89_999_999)
            } else {
                format!("{:010}", 1_000_000_000 + i * 104_729)
            };
            let fecha_nacimiento = NaiveDate::from_ymd_opt(1965 + (i % 38) as i32, 1 + (i % 12) as u32, 1 + (i % 28) as u32)
                .unwrap_or_default();

            Empleado {
                id: Uuid::from_u128(0x5eed_0000_0000_0000_0000_0000_0000_0000 + i as u128),
                numero_documento: format!("{}{}", 10_000_000 + i * 104_729 % 15_000_000, i % 10),
                nombre: nombre.to_string(),
                apellido: apellido.to_string(),
                segundo_apellido: (i % 4 != 0).then(|| segundo.to_string()),
                fecha_nacimiento,
                pais_nacimiento: if i % 9 == 0 { "PE" } else { "CL" }.to_string(),
                sexo,
                estado_civil: EstadoCivil::ALL[i % EstadoCivil::ALL.len()],
                telefono_particular: format!("+569{:08}", 40_000_000 + i * 1_117),
                email_personal: format!(
                    "{}.{}{}@example.cl",
                    nombre.to_lowercase(),
                    apellido.to_lowercase(),
                    i
                ),
                calle: Some(calle.to_string()),
                numero_calle: Some(numero.to_string()),
                depto_oficina: (i % 5 == 0).then(|| format!("Depto {}", 10 + i % 90)),
                ciudad: region.name.to_string(),
                comuna: comuna.to_string(),
                direccion: format!("{calle} {numero}, {comuna}, {}", region.name),
                contacto_emergencia_nombre: format!("{} {}", NOMBRES[(i + 5) % NOMBRES.len()].0, apellido),
                contacto_emergencia_telefono: format!("+569{:08}", 60_000_000 + i * 613),
                banco,
                tipo_cuenta: TipoCuenta::ALL[i % TipoCuenta::ALL.len()],
                numero_cuenta,
                fondo_cotizacion: FondoCotizacion::ALL[i % FondoCotizacion::ALL.len()],
                salud: Salud::ALL[i % Salud::ALL.len()],
                afc: Afc::ALL[i % Afc::ALL.len()],
                talla_superior: (i % 7 != 0).then(|| TallaSuperior::ALL[i % TallaSuperior::ALL.len()]),
                talla_inferior: (i % 7 != 0).then(|| TallaInferior::ALL[i % TallaInferior::ALL.len()]),
                talla_zapato: (i % 7 != 0).then(|| 36 + (i % 11) as u8),
                nv: TAGS[i % TAGS.len()].map(str::to_string),
                created_at: Some(base + Duration::hours(i as i64 * 5)),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_seed_is_consistent() {
        let rows = seed_empleados(60);
        assert_eq!(rows.len(), 60);
        let ids: HashSet<_> = rows.iter().map(|r| r.id).collect();
        assert_eq!(ids.len(), 60);
        for r in &rows {
            assert!(regions::is_comuna_in_region(&r.ciudad, &r.comuna));
            assert!(r.email_personal.contains('@'));
            if r.banco == Banco::BancoEstado {
                assert_eq!(r.numero_cuenta.len(), 8);
            }
        }
    }
}
