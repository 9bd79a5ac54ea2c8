//! Hand-curated municipal-area table.
//!
//! Maps the names found in the district boundary `GeoJSON` (municipal
//! okrugs, towns and settlements) to the district they belong to. Must be
//! kept in sync with the boundary asset by hand whenever it changes.

use gorod_district_models::District;

/// Municipal-area name to district.
///
/// Names are matched exactly. Common `ё`/`е` spelling variants seen in
/// upstream boundary exports are listed explicitly.
pub const MUNICIPAL_AREAS: &[(&str, District)] = &[
    // Адмиралтейский
    ("Адмиралтейский район", District::Admiralteysky),
    ("Адмиралтейский округ", District::Admiralteysky),
    ("Семёновский", District::Admiralteysky),
    ("Семеновский", District::Admiralteysky),
    ("Измайловское", District::Admiralteysky),
    ("Екатерингофский", District::Admiralteysky),
    ("Коломна", District::Admiralteysky),
    ("Сенной округ", District::Admiralteysky),
    // Василеостровский
    ("Василеостровский район", District::Vasileostrovsky),
    ("Васильевский", District::Vasileostrovsky),
    ("Гавань", District::Vasileostrovsky),
    ("Морской", District::Vasileostrovsky),
    ("Остров Декабристов", District::Vasileostrovsky),
    ("№ 7", District::Vasileostrovsky),
    // Выборгский
    ("Выборгский район", District::Vyborgsky),
    ("Сампсониевское", District::Vyborgsky),
    ("Светлановское", District::Vyborgsky),
    ("Сосновское", District::Vyborgsky),
    ("№ 15", District::Vyborgsky),
    ("Парголово", District::Vyborgsky),
    ("Шувалово-Озерки", District::Vyborgsky),
    ("Левашово", District::Vyborgsky),
    // Калининский
    ("Калининский район", District::Kalininsky),
    ("Гражданка", District::Kalininsky),
    ("Академическое", District::Kalininsky),
    ("Финляндский округ", District::Kalininsky),
    ("№ 21", District::Kalininsky),
    ("Пискарёвка", District::Kalininsky),
    ("Пискаревка", District::Kalininsky),
    ("Северный", District::Kalininsky),
    ("Прометей", District::Kalininsky),
    // Кировский
    ("Кировский район", District::Kirovsky),
    ("Княжево", District::Kirovsky),
    ("Ульянка", District::Kirovsky),
    ("Дачное", District::Kirovsky),
    ("Автово", District::Kirovsky),
    ("Нарвский округ", District::Kirovsky),
    ("Красненькая речка", District::Kirovsky),
    ("Морские ворота", District::Kirovsky),
    // Колпинский
    ("Колпинский район", District::Kolpinsky),
    ("Колпино", District::Kolpinsky),
    ("Понтонный", District::Kolpinsky),
    ("Сапёрный", District::Kolpinsky),
    ("Саперный", District::Kolpinsky),
    ("Металлострой", District::Kolpinsky),
    ("Усть-Ижора", District::Kolpinsky),
    ("Петро-Славянка", District::Kolpinsky),
    // Красногвардейский
    ("Красногвардейский район", District::Krasnogvardeysky),
    ("Полюстрово", District::Krasnogvardeysky),
    ("Большая Охта", District::Krasnogvardeysky),
    ("Малая Охта", District::Krasnogvardeysky),
    ("Пороховые", District::Krasnogvardeysky),
    ("Ржевка", District::Krasnogvardeysky),
    // Красносельский
    ("Красносельский район", District::Krasnoselsky),
    ("Юго-Запад", District::Krasnoselsky),
    ("Южно-Приморский", District::Krasnoselsky),
    ("Сосновая Поляна", District::Krasnoselsky),
    ("Урицк", District::Krasnoselsky),
    ("Константиновское", District::Krasnoselsky),
    ("Горелово", District::Krasnoselsky),
    ("Красное Село", District::Krasnoselsky),
    // Кронштадтский
    ("Кронштадтский район", District::Kronshtadtsky),
    ("Кронштадт", District::Kronshtadtsky),
    // Курортный
    ("Курортный район", District::Kurortny),
    ("Сестрорецк", District::Kurortny),
    ("Зеленогорск", District::Kurortny),
    ("Белоостров", District::Kurortny),
    ("Комарово", District::Kurortny),
    ("Молодёжное", District::Kurortny),
    ("Молодежное", District::Kurortny),
    ("Песочный", District::Kurortny),
    ("Репино", District::Kurortny),
    ("Серово", District::Kurortny),
    ("Смолячково", District::Kurortny),
    ("Солнечное", District::Kurortny),
    ("Ушково", District::Kurortny),
    // Московский
    ("Московский район", District::Moskovsky),
    ("Московская застава", District::Moskovsky),
    ("Гагаринское", District::Moskovsky),
    ("Новоизмайловское", District::Moskovsky),
    ("Пулковский меридиан", District::Moskovsky),
    ("Звёздное", District::Moskovsky),
    ("Звездное", District::Moskovsky),
    // Невский
    ("Невский район", District::Nevsky),
    ("Невская застава", District::Nevsky),
    ("Ивановский", District::Nevsky),
    ("Обуховский", District::Nevsky),
    ("Рыбацкое", District::Nevsky),
    ("Народный", District::Nevsky),
    ("№ 54", District::Nevsky),
    ("Невский округ", District::Nevsky),
    ("Оккервиль", District::Nevsky),
    ("Правобережный", District::Nevsky),
    // Петроградский
    ("Петроградский район", District::Petrogradsky),
    ("Введенский", District::Petrogradsky),
    ("Кронверкское", District::Petrogradsky),
    ("Посадский", District::Petrogradsky),
    ("Аптекарский остров", District::Petrogradsky),
    ("Петровский", District::Petrogradsky),
    ("Чкаловское", District::Petrogradsky),
    // Петродворцовый
    ("Петродворцовый район", District::Petrodvortsovy),
    ("Петергоф", District::Petrodvortsovy),
    ("Ломоносов", District::Petrodvortsovy),
    ("Стрельна", District::Petrodvortsovy),
    // Приморский
    ("Приморский район", District::Primorsky),
    ("Лахта-Ольгино", District::Primorsky),
    ("№ 65", District::Primorsky),
    ("Чёрная речка", District::Primorsky),
    ("Черная речка", District::Primorsky),
    ("Комендантский аэродром", District::Primorsky),
    ("Озеро Долгое", District::Primorsky),
    ("Юнтолово", District::Primorsky),
    ("Коломяги", District::Primorsky),
    ("Лисий Нос", District::Primorsky),
    // Пушкинский
    ("Пушкинский район", District::Pushkinsky),
    ("Пушкин", District::Pushkinsky),
    ("Павловск", District::Pushkinsky),
    ("Шушары", District::Pushkinsky),
    ("Тярлево", District::Pushkinsky),
    ("Александровская", District::Pushkinsky),
    // Фрунзенский
    ("Фрунзенский район", District::Frunzensky),
    ("Волковское", District::Frunzensky),
    ("№ 72", District::Frunzensky),
    ("Купчино", District::Frunzensky),
    ("Георгиевский", District::Frunzensky),
    ("№ 75", District::Frunzensky),
    ("Балканский", District::Frunzensky),
    // Центральный
    ("Центральный район", District::Tsentralny),
    ("Дворцовый округ", District::Tsentralny),
    ("№ 78", District::Tsentralny),
    ("Литейный округ", District::Tsentralny),
    ("Смольнинское", District::Tsentralny),
    ("Лиговка-Ямская", District::Tsentralny),
    ("Владимирский округ", District::Tsentralny),
];
