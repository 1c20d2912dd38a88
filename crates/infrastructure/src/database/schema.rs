// Database schema for the artist catalog
diesel::table! {
    #[sql_name = "Artist"]
    artists (artist_id) {
        #[sql_name = "ArtistId"]
        artist_id -> Integer,
        #[sql_name = "Name"]
        name -> Nullable<Text>,
    }
}
