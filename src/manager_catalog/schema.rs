diesel::table! {
    cities (city_id) {
        city_id -> Integer,
        active -> Bool,
        name -> Varchar,
        lat -> Double,
        lon -> Double,
        tz -> Nullable<Integer>,
        country -> Nullable<Varchar>,
        country_code -> Nullable<Varchar>,
        added -> Nullable<Date>,
        started -> Nullable<Date>,
        daily -> Bool,
        hourly -> Bool,
        icon -> Bool,
        icon_15 -> Bool,
        gfs -> Bool,
        meteofrance -> Bool,
        horizon -> Integer,
        comment -> Nullable<Text>,
        last_hit -> Nullable<Date>,
    }
}
