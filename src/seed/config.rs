pub struct Config {
    pub stations_file_name: String,
    pub trains_file_name: String,
    pub stops_file_name: String,
    pub schedules_file_name: String,
    pub coach_types_file_name: String,
    pub coaches_file_name: String,
    pub seats_file_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            stations_file_name: "stations.csv".into(),
            trains_file_name: "trains.csv".into(),
            stops_file_name: "stops.csv".into(),
            schedules_file_name: "schedules.csv".into(),
            coach_types_file_name: "coach_types.csv".into(),
            coaches_file_name: "coaches.csv".into(),
            seats_file_name: "seats.csv".into(),
        }
    }
}
