pub mod buyer;
pub mod certificate;
pub mod city;
pub mod company_certificate;
pub mod company_license;
pub mod domain;
pub mod inquiry;
pub mod license;
pub mod proposal;
pub mod proposal_file;
pub mod region;
pub mod sub_domain;
pub mod supplier;
pub mod tender;
pub mod tender_sub_domain;

/*
 Buyers post tenders, suppliers bid on them with proposals.
 A tender moves OPEN -> AWARDING once its submit deadline passes, then
 AWARDING -> FINISHED when the buyer awards a supplier (or closes it without one).
 FINISHED is terminal.
 Domains/sub-domains classify both companies and tenders; regions/cities locate them.
 */
