// registro-client/tests/registration_flow.rs
// Full pass through the registration form into the in-memory store

use chrono::NaiveDate;
use registro_client::form::{self, Field, FormWizard, Phase, Step};
use registro_client::{DataStore, MemoryStore};
use shared::error::ErrorCode;
use shared::models::{Banco, ListParams};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()
}

/// Fill the current step and move on, for every step
fn fill_all(w: &mut FormWizard) {
    let steps: [&[(Field, &str)]; 7] = [
        &[
            (Field::Nombre, "MARÍA elena"),
            (Field::Apellido, "rojas"),
            (Field::NumeroDocumento, "12.345.678-9"),
            (Field::FechaNacimiento, "1990-05-17"),
            (Field::Sexo, "Femenino"),
            (Field::EstadoCivil, "Soltero/a"),
        ],
        &[
            (Field::TelefonoParticular, "9 1234 5678"),
            (Field::EmailPersonal, "maria@example.com"),
        ],
        &[
            (Field::Ciudad, "Antofagasta"),
            (Field::Comuna, "Calama"),
            (Field::Calle, "Av. Grecia"),
            (Field::NumeroCalle, "1500"),
            (Field::DeptoOficina, "Depto 4B"),
        ],
        &[
            (Field::ContactoEmergenciaNombre, "pedro rojas"),
            (Field::ContactoEmergenciaTelefono, "987654321"),
        ],
        &[
            (Field::Banco, "BANCOESTADO"),
            (Field::TipoCuenta, "Cuenta Vista"),
            (Field::NumeroCuenta, "1234567890"),
        ],
        &[
            (Field::FondoCotizacion, "Habitat"),
            (Field::Salud, "Fonasa"),
            (Field::Afc, "Menos de 11 Años"),
        ],
        &[
            (Field::TallaSuperior, "M"),
            (Field::TallaInferior, "42 (M)"),
            (Field::TallaZapato, "40"),
        ],
    ];

    for (i, values) in steps.iter().enumerate() {
        assert_eq!(w.step().map(|s| s.number() as usize), Some(i + 1));
        for (field, value) in values.iter() {
            w.set(*field, value).unwrap();
        }
        if i < 6 {
            w.next().unwrap();
        }
    }
}

#[tokio::test]
async fn test_full_submission() {
    let store = MemoryStore::new();
    let mut w = FormWizard::from_entry("https://registro.example.cl/formulario?nv=NV499").with_today(today());
    fill_all(&mut w);

    let input = w.begin_submit().unwrap();
    assert_eq!(w.phase(), &Phase::Submitting);
    assert_eq!(input.direccion, "Av. Grecia 1500, Depto 4B, Calama, Antofagasta");
    assert_eq!(input.nombre, "María Elena");
    assert_eq!(input.numero_documento, "123456789");
    assert_eq!(input.telefono_particular, "+56912345678");
    assert_eq!(input.contacto_emergencia_telefono, "+56987654321");
    assert_eq!(input.banco, Banco::BancoEstado);
    assert_eq!(input.numero_cuenta, "12345678");
    assert_eq!(input.nv.as_str(), "NV499");

    let result = store.insert(&input).await;
    w.finish_submit(result).unwrap();
    assert!(matches!(w.phase(), Phase::Submitted { .. }));

    let rows = store.list(&ListParams::default()).await;
    assert_eq!(rows.count, Some(1));
    assert_eq!(rows.data[0].nv.as_deref(), Some("NV499"));
    assert_eq!(rows.data[0].direccion, input.direccion);
}

#[tokio::test]
async fn test_failed_insert_keeps_data() {
    let store = MemoryStore::new();
    let mut w = FormWizard::from_entry("nv=NV12").with_today(today());
    fill_all(&mut w);
    let filled = w.data().clone();

    store.set_failure(Some("duplicate key")).await;
    let err = form::submit(&mut w, &store).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::SubmitFailed);
    assert_eq!(w.phase(), &Phase::Editing(Step::Tallas));
    assert_eq!(w.submit_error(), Some("Invalid response: duplicate key"));
    assert_eq!(w.data(), &filled);

    store.set_failure(None).await;
    form::submit(&mut w, &store).await.unwrap();
    assert!(matches!(w.phase(), Phase::Submitted { .. }));
    assert_eq!(w.submit_error(), None);
    assert_eq!(store.len().await, 1);
}

#[tokio::test]
async fn test_submit_blocked_until_form_complete() {
    let mut w = FormWizard::from_entry("nv=NV499").with_today(today());
    fill_all(&mut w);
    // blank an earlier field; the form cannot be submitted from there
    for _ in 0..5 {
        assert!(w.prev());
    }
    assert_eq!(w.step(), Some(Step::Contacto));
    w.set(Field::EmailPersonal, "").unwrap();
    assert!(w.next().is_err());

    let err = w.begin_submit().unwrap_err();
    assert_eq!(err.code, ErrorCode::StepIncomplete);
    assert_eq!(w.step(), Some(Step::Contacto));
}

#[tokio::test]
async fn test_bad_tag_never_advances() {
    let store = MemoryStore::new();
    for entry in ["https://registro.example.cl/formulario?nv=abc", "https://registro.example.cl/formulario"] {
        let mut w = FormWizard::from_entry(entry);
        assert!(matches!(w.phase(), Phase::NvError(_)));
        assert!(w.next().is_err());
        assert!(form::submit(&mut w, &store).await.is_err());
        assert!(matches!(w.phase(), Phase::NvError(_)));
    }
    assert!(store.is_empty().await);
}
