//! Static weather-code tables, one per upstream provider.
//!
//! Each accessor is a total function: codes absent from its table resolve to
//! [`FALLBACK`] instead of failing. Entries are grouped by physical
//! phenomenon; codes of increasing severity within a group share an icon and
//! differ only in description. Adding a provider means adding a table and an
//! accessor with the same contract, nothing else in the core changes.

use crate::model::WeatherCondition;

/// (code, category, description, OpenWeatherMap icon id)
type Entry = (i64, &'static str, &'static str, &'static str);

/// Returned for any code a table does not know about.
const FALLBACK: (&str, &str, &str) = ("Desconocido", "clima desconocido", "01d");

/// WMO weather interpretation codes as emitted by Open-Meteo.
/// <https://open-meteo.com/en/docs#weathervariables>
const WMO_TABLE: &[Entry] = &[
    // clear
    (0, "Despejado", "cielo despejado", "01d"),
    (1, "Despejado", "mayormente despejado", "02d"),
    // clouds
    (2, "Parcialmente nublado", "parcialmente nublado", "03d"),
    (3, "Nublado", "nublado", "04d"),
    // fog
    (45, "Niebla", "niebla", "50d"),
    (48, "Niebla", "niebla helada", "50d"),
    // drizzle
    (51, "Llovizna", "llovizna ligera", "09d"),
    (53, "Llovizna", "llovizna moderada", "09d"),
    (55, "Llovizna", "llovizna densa", "09d"),
    (56, "Llovizna", "llovizna helada ligera", "09d"),
    (57, "Llovizna", "llovizna helada densa", "09d"),
    // rain
    (61, "Lluvia", "lluvia ligera", "10d"),
    (63, "Lluvia", "lluvia moderada", "10d"),
    (65, "Lluvia", "lluvia fuerte", "10d"),
    (66, "Lluvia", "lluvia helada ligera", "10d"),
    (67, "Lluvia", "lluvia helada fuerte", "10d"),
    // rain showers
    (80, "Lluvia", "chubascos ligeros", "09d"),
    (81, "Lluvia", "chubascos moderados", "09d"),
    (82, "Lluvia", "chubascos violentos", "09d"),
    // snow
    (71, "Nieve", "nevada ligera", "13d"),
    (73, "Nieve", "nevada moderada", "13d"),
    (75, "Nieve", "nevada fuerte", "13d"),
    (77, "Nieve", "granos de nieve", "13d"),
    (85, "Nieve", "chubascos de nieve ligeros", "13d"),
    (86, "Nieve", "chubascos de nieve fuertes", "13d"),
    // thunderstorm
    (95, "Tormenta", "tormenta eléctrica", "11d"),
    (96, "Tormenta", "tormenta con granizo ligero", "11d"),
    (99, "Tormenta", "tormenta con granizo fuerte", "11d"),
];

/// OpenWeatherMap condition codes, for the alternate adapter.
/// <https://openweathermap.org/weather-conditions>
const OWM_TABLE: &[Entry] = &[
    // thunderstorm
    (200, "Tormenta", "tormenta con lluvia ligera", "11d"),
    (201, "Tormenta", "tormenta con lluvia", "11d"),
    (202, "Tormenta", "tormenta con lluvia fuerte", "11d"),
    (210, "Tormenta", "tormenta ligera", "11d"),
    (211, "Tormenta", "tormenta eléctrica", "11d"),
    (212, "Tormenta", "tormenta fuerte", "11d"),
    (221, "Tormenta", "tormenta irregular", "11d"),
    (230, "Tormenta", "tormenta con llovizna ligera", "11d"),
    (231, "Tormenta", "tormenta con llovizna", "11d"),
    (232, "Tormenta", "tormenta con llovizna fuerte", "11d"),
    // drizzle
    (300, "Llovizna", "llovizna ligera", "09d"),
    (301, "Llovizna", "llovizna", "09d"),
    (302, "Llovizna", "llovizna densa", "09d"),
    (310, "Llovizna", "llovizna y lluvia ligera", "09d"),
    (311, "Llovizna", "llovizna y lluvia", "09d"),
    (312, "Llovizna", "llovizna y lluvia densa", "09d"),
    (321, "Llovizna", "chubasco de llovizna", "09d"),
    // rain
    (500, "Lluvia", "lluvia ligera", "10d"),
    (501, "Lluvia", "lluvia moderada", "10d"),
    (502, "Lluvia", "lluvia intensa", "10d"),
    (503, "Lluvia", "lluvia muy intensa", "10d"),
    (504, "Lluvia", "lluvia extrema", "10d"),
    (511, "Lluvia", "lluvia helada", "13d"),
    (520, "Lluvia", "chubascos ligeros", "09d"),
    (521, "Lluvia", "chubascos", "09d"),
    (522, "Lluvia", "chubascos intensos", "09d"),
    (531, "Lluvia", "chubascos irregulares", "09d"),
    // snow
    (600, "Nieve", "nevada ligera", "13d"),
    (601, "Nieve", "nevada", "13d"),
    (602, "Nieve", "nevada fuerte", "13d"),
    (611, "Nieve", "aguanieve", "13d"),
    (612, "Nieve", "chubascos de aguanieve ligeros", "13d"),
    (613, "Nieve", "chubascos de aguanieve", "13d"),
    (615, "Nieve", "lluvia y nieve ligera", "13d"),
    (616, "Nieve", "lluvia y nieve", "13d"),
    (620, "Nieve", "chubascos de nieve ligeros", "13d"),
    (621, "Nieve", "chubascos de nieve", "13d"),
    (622, "Nieve", "chubascos de nieve fuertes", "13d"),
    // atmosphere
    (701, "Niebla", "neblina", "50d"),
    (711, "Niebla", "humo", "50d"),
    (721, "Niebla", "calima", "50d"),
    (731, "Niebla", "remolinos de polvo", "50d"),
    (741, "Niebla", "niebla", "50d"),
    (751, "Niebla", "arena", "50d"),
    (761, "Niebla", "polvo", "50d"),
    (762, "Niebla", "ceniza volcánica", "50d"),
    (771, "Niebla", "turbonada", "50d"),
    (781, "Niebla", "tornado", "50d"),
    // clear / clouds
    (800, "Despejado", "cielo despejado", "01d"),
    (801, "Despejado", "algunas nubes", "02d"),
    (802, "Parcialmente nublado", "nubes dispersas", "03d"),
    (803, "Nublado", "nubes rotas", "04d"),
    (804, "Nublado", "muy nublado", "04d"),
];

/// Resolve an Open-Meteo WMO weather code. Never fails.
pub fn wmo_condition(code: i64) -> WeatherCondition {
    lookup(WMO_TABLE, code)
}

/// Resolve an OpenWeatherMap condition code. Never fails.
pub fn owm_condition(code: i64) -> WeatherCondition {
    lookup(OWM_TABLE, code)
}

fn lookup(table: &[Entry], code: i64) -> WeatherCondition {
    let (category, description, icon_id) = table
        .iter()
        .find(|(c, ..)| *c == code)
        .map_or(FALLBACK, |(_, cat, desc, icon)| (*cat, *desc, *icon));

    WeatherCondition {
        category: category.to_string(),
        description: description.to_string(),
        icon_id: icon_id.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_sky_exact_triple() {
        let c = wmo_condition(0);
        assert_eq!(c.category, "Despejado");
        assert_eq!(c.description, "cielo despejado");
        assert_eq!(c.icon_id, "01d");
    }

    #[test]
    fn severity_within_group_shares_icon() {
        for code in [61, 63, 65] {
            assert_eq!(wmo_condition(code).icon_id, "10d");
            assert_eq!(wmo_condition(code).category, "Lluvia");
        }
        for code in [71, 73, 75] {
            assert_eq!(wmo_condition(code).icon_id, "13d");
        }
    }

    #[test]
    fn unknown_code_returns_fallback() {
        for code in [999, -1, 4, 100] {
            let c = wmo_condition(code);
            assert_eq!(c.category, "Desconocido");
            assert_eq!(c.description, "clima desconocido");
            assert_eq!(c.icon_id, "01d");
        }
    }

    #[test]
    fn same_code_is_bit_identical() {
        assert_eq!(wmo_condition(95), wmo_condition(95));
        assert_eq!(owm_condition(800), owm_condition(800));
    }

    #[test]
    fn owm_clear_and_thunderstorm() {
        assert_eq!(owm_condition(800).category, "Despejado");
        assert_eq!(owm_condition(211).category, "Tormenta");
        assert_eq!(owm_condition(211).icon_id, "11d");
    }

    #[test]
    fn owm_unknown_code_returns_fallback() {
        assert_eq!(owm_condition(42).description, "clima desconocido");
    }
}
